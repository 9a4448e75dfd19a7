//! # Media library
//!
//! Asset listings the editor binds into image fields.

use crate::error::MediaError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Document,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(alias = "address")]
    pub url: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub kind: AssetKind,
}

impl Asset {
    pub fn is_image(&self) -> bool {
        self.kind == AssetKind::Image
    }

    /// Label shown in pickers, falling back to the last URL segment
    pub fn display_label(&self) -> &str {
        if !self.label.trim().is_empty() {
            return &self.label;
        }
        self.url.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or(&self.url)
    }
}

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn list_assets(&self) -> Result<Vec<Asset>, MediaError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Manifest {
    Wrapped { assets: Vec<Asset> },
    Bare(Vec<Asset>),
}

/// Assets listed in a JSON manifest on disk
///
/// The manifest is either an array of assets or an object with an
/// `assets` array.
pub struct ManifestMediaLibrary {
    path: PathBuf,
}

impl ManifestMediaLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MediaLibrary for ManifestMediaLibrary {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn list_assets(&self) -> Result<Vec<Asset>, MediaError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let assets = match serde_json::from_str(&raw)? {
            Manifest::Wrapped { assets } | Manifest::Bare(assets) => assets,
        };

        debug!(count = assets.len(), "Read asset manifest");
        Ok(assets)
    }
}

/// Fixed asset list
#[derive(Debug, Clone, Default)]
pub struct StaticMediaLibrary {
    assets: Vec<Asset>,
}

impl StaticMediaLibrary {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl MediaLibrary for StaticMediaLibrary {
    async fn list_assets(&self) -> Result<Vec<Asset>, MediaError> {
        Ok(self.assets.clone())
    }
}

/// The last fetched asset list, narrowed to images
#[derive(Debug, Clone, Default)]
pub struct AssetPicker {
    assets: Vec<Asset>,
}

impl AssetPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_assets(&mut self, assets: Vec<Asset>) {
        self.assets = assets;
    }

    pub fn len(&self) -> usize {
        self.images().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn images(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|asset| asset.is_image())
    }

    /// Case-insensitive substring match on the label; an empty query
    /// matches every image
    pub fn search(&self, query: &str) -> Vec<&Asset> {
        let needle = query.trim().to_lowercase();
        self.images()
            .filter(|asset| needle.is_empty() || asset.display_label().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Asset> {
        self.images().find(|asset| asset.id == id)
    }
}
