pub mod add;
pub mod assets;
pub mod blocks;
pub mod compile;
pub mod init;
pub mod preview;
pub mod save;

pub use add::{add, AddArgs};
pub use assets::{assets, AssetsArgs};
pub use blocks::blocks;
pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};
pub use save::{save, SaveArgs};

use anyhow::{anyhow, Context, Result};
use mailframe_document::Document;
use std::fs;
use std::path::Path;

/// Read a design document from disk
pub(crate) fn read_design(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(anyhow!("Design does not exist: {}", path.display()));
    }
    let source = fs::read_to_string(path)?;
    Document::from_json(&source).with_context(|| format!("Invalid design {}", path.display()))
}

pub(crate) fn write_design(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.to_json_pretty()?)?;
    Ok(())
}
