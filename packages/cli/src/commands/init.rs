use super::write_design;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailframe_document::BlockType;
use mailframe_editor::{EditSession, Mutation};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Designs directory
    #[arg(short, long, default_value = "designs")]
    pub designs_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Mailframe project...".bright_blue().bold());

    let config = Config {
        designs_dir: args.designs_dir.clone(),
        ..Config::default()
    };

    let designs_dir = config.get_designs_dir(cwd);
    if !designs_dir.exists() {
        fs::create_dir_all(&designs_dir)?;
        println!("  {} Created {}/", "✓".green(), args.designs_dir);
    }

    let starter = designs_dir.join("welcome.json");
    if !starter.exists() {
        write_design(&starter, &starter_design()?)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Add blocks: mailframe add welcome hero");
    println!("  2. Run: mailframe compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// Header, greeting, call to action and footer
fn starter_design() -> Result<mailframe_document::Document> {
    let mut session = EditSession::new();

    for block_type in [BlockType::Header, BlockType::Text, BlockType::Button, BlockType::Footer] {
        session.apply(Mutation::AddBlock {
            block_type,
            index: None,
        })?;
    }

    if let Some(text) = session.document().blocks.get(1).map(|b| b.id.clone()) {
        let greeting = json!({ "text": "Welcome aboard!\nWe're glad to have you with us." });
        if let Some(content) = greeting.as_object() {
            session.apply(Mutation::UpdateContent {
                block_id: text,
                content: content.clone(),
            })?;
        }
    }

    Ok(session.document().clone())
}
