use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use mailframe_workspace::{AssetPicker, ManifestMediaLibrary, MediaLibrary};

#[derive(Debug, Args)]
pub struct AssetsArgs {
    /// Case-insensitive label filter
    #[arg(short, long, default_value = "")]
    pub query: String,
}

/// List image assets from the configured manifest
pub async fn assets(args: AssetsArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let manifest = config
        .get_assets_manifest(cwd)
        .ok_or_else(|| anyhow!("No assetsManifest configured in {}", DEFAULT_CONFIG_NAME))?;

    let mut picker = AssetPicker::new();
    picker.set_assets(ManifestMediaLibrary::new(&manifest).list_assets().await?);

    let matches = picker.search(&args.query);
    if matches.is_empty() {
        println!("{}", "⚠️  No matching images".yellow());
        return Ok(());
    }

    for asset in matches {
        println!("  {} {} {}", asset.id.bold(), asset.display_label(), asset.url.dimmed());
    }

    Ok(())
}
