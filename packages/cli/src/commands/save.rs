use super::read_design;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailframe_editor::EditSession;
use mailframe_workspace::{slugify, DesignMeta, FileDesignStore, StaticMediaLibrary, Studio};

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Design file or name inside the designs directory
    pub design: String,

    /// Display name of the design
    #[arg(short, long)]
    pub name: String,

    /// Storage key (derived from the name when omitted)
    #[arg(long)]
    pub slug: Option<String>,

    /// Message subject, also used as the HTML title
    #[arg(long, default_value = "")]
    pub subject: String,
}

/// Compile a design and persist it to the local design store
pub async fn save(args: SaveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = read_design(&config.resolve_design(cwd, &args.design))?;

    let store = FileDesignStore::new(config.get_store_dir(cwd));
    let mut studio = Studio::with_session(EditSession::with_document(document), store, StaticMediaLibrary::default());

    let slug = args.slug.clone().unwrap_or_else(|| slugify(&args.name));
    studio.set_meta(DesignMeta {
        name: args.name.clone(),
        slug,
        subject: args.subject.clone(),
    });

    let saved = studio.save().await?;

    for notification in studio.take_notifications() {
        println!("  {} {}", "✓".green(), notification.message);
    }
    println!(
        "  {} {}",
        "→".dimmed(),
        config.get_store_dir(cwd).join(format!("{}.json", saved.slug)).display()
    );

    Ok(())
}
