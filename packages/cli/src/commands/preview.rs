use super::read_design;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use mailframe_preview::render_preview;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Design file or name inside the designs directory
    pub design: String,

    /// Block to render as selected
    #[arg(short, long)]
    pub selected: Option<String>,
}

/// Print the interactive preview tree as JSON
pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = read_design(&config.resolve_design(cwd, &args.design))?;

    if let Some(id) = args.selected.as_deref() {
        if !document.contains(id) {
            return Err(anyhow!("No block with id {} in {}", id, args.design));
        }
    }

    let view = render_preview(&document, args.selected.as_deref());
    println!("{}", view.to_json()?);
    Ok(())
}
