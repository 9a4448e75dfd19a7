use super::{read_design, write_design};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailframe_document::Document;
use mailframe_editor::EditSession;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Design file or name inside the designs directory
    pub design: String,

    /// Block type (see `mailframe blocks`)
    pub block_type: String,

    /// Position to insert at (appends by default)
    #[arg(short, long)]
    pub index: Option<usize>,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.resolve_design(cwd, &args.design);

    let document = if path.exists() {
        read_design(&path)?
    } else {
        println!("  {} Creating {}", "✓".green(), path.display());
        Document::new()
    };

    let mut session = EditSession::with_document(document);
    let result = session.add_block_named(&args.block_type, args.index)?;
    write_design(&path, session.document())?;

    let id = result.created.unwrap_or_default();
    println!(
        "  {} Added {} block {} to {}",
        "✓".green(),
        args.block_type.trim().to_lowercase().bold(),
        id.dimmed(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        for block_type in ["hero", "text"] {
            add(
                AddArgs {
                    design: "launch".to_string(),
                    block_type: block_type.to_string(),
                    index: None,
                },
                &cwd,
            )
            .unwrap();
        }

        add(
            AddArgs {
                design: "launch".to_string(),
                block_type: "Divider".to_string(),
                index: Some(1),
            },
            &cwd,
        )
        .unwrap();

        let doc = read_design(&dir.path().join("designs/launch.json")).unwrap();
        let types: Vec<&str> = doc.blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, vec!["hero", "divider", "text"]);
    }

    #[test]
    fn test_add_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        let result = add(
            AddArgs {
                design: "launch".to_string(),
                block_type: "carousel".to_string(),
                index: None,
            },
            &cwd,
        );
        assert!(result.is_err());
        assert!(!dir.path().join("designs/launch.json").exists());
    }
}
