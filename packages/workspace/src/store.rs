//! # Design persistence
//!
//! A saved design is the compiled markup plus the raw document JSON, so it
//! can be both sent and reopened in the editor.

use crate::error::{StoreError, ValidationError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub subject: String,
    pub compiled_markup: String,
    /// Document JSON, stored verbatim
    pub raw_design: String,
}

impl SaveRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        validate_slug(&self.slug)
    }
}

/// Slugs become file names, so they are restricted to `[a-z0-9]` runs
/// joined by single dashes
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.trim().is_empty() {
        return Err(ValidationError::MissingSlug);
    }

    let valid = slug
        .split('-')
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlug(slug.to_string()))
    }
}

/// Turn a display name into a slug candidate
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    pub name: String,
    pub slug: String,
    pub subject: String,
    pub compiled_markup: String,
    pub raw_design: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedDesign {
    fn from_request(request: SaveRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
            subject: request.subject,
            compiled_markup: request.compiled_markup,
            raw_design: request.raw_design,
            saved_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait DesignStore: Send + Sync {
    async fn save(&self, request: SaveRequest) -> Result<SavedDesign, StoreError>;

    async fn load(&self, slug: &str) -> Result<SavedDesign, StoreError>;

    /// Slugs of every stored design, sorted
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Directory of `<slug>.json` records with `<slug>.html` markup alongside
pub struct FileDesignStore {
    root: PathBuf,
}

impl FileDesignStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.json", slug))
    }

    fn markup_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.html", slug))
    }
}

#[async_trait]
impl DesignStore for FileDesignStore {
    #[instrument(skip_all, fields(slug = %request.slug))]
    async fn save(&self, request: SaveRequest) -> Result<SavedDesign, StoreError> {
        request.validate()?;

        let saved = SavedDesign::from_request(request);
        tokio::fs::create_dir_all(&self.root).await?;
        let record = serde_json::to_string_pretty(&saved)?;

        // The record is what `load` and `list` see, so it lands last and atomically
        tokio::fs::write(self.markup_path(&saved.slug), &saved.compiled_markup).await?;
        let staged = self.root.join(format!(".{}.json.tmp", saved.slug));
        tokio::fs::write(&staged, record).await?;
        tokio::fs::rename(&staged, self.record_path(&saved.slug)).await?;

        info!(root = %self.root.display(), "Saved design");
        Ok(saved)
    }

    async fn load(&self, slug: &str) -> Result<SavedDesign, StoreError> {
        validate_slug(slug)?;

        let path = self.record_path(slug);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(slug.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), "Loaded design record");
        Ok(serde_json::from_str(&raw)?)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut slugs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    slugs.push(stem.to_string());
                }
            }
        }

        slugs.sort();
        Ok(slugs)
    }
}

/// In-process store, for tests and embedding
#[derive(Default)]
pub struct MemoryDesignStore {
    designs: RwLock<BTreeMap<String, SavedDesign>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DesignStore for MemoryDesignStore {
    async fn save(&self, request: SaveRequest) -> Result<SavedDesign, StoreError> {
        request.validate()?;

        let saved = SavedDesign::from_request(request);
        self.designs.write().await.insert(saved.slug.clone(), saved.clone());
        Ok(saved)
    }

    async fn load(&self, slug: &str) -> Result<SavedDesign, StoreError> {
        self.designs
            .read()
            .await
            .get(slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.designs.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, slug: &str) -> SaveRequest {
        SaveRequest {
            name: name.to_string(),
            slug: slug.to_string(),
            subject: String::new(),
            compiled_markup: "<html></html>".to_string(),
            raw_design: "{\"blocks\":[]}".to_string(),
        }
    }

    #[test]
    fn test_validate_request() {
        assert_eq!(request("Welcome", "welcome-1").validate(), Ok(()));
        assert_eq!(request("  ", "welcome").validate(), Err(ValidationError::MissingName));
        assert_eq!(request("Welcome", "").validate(), Err(ValidationError::MissingSlug));
    }

    #[test]
    fn test_slug_rules() {
        for bad in ["Welcome", "welcome_1", "-welcome", "welcome-", "wel--come", "../etc", "a b"] {
            assert!(
                matches!(validate_slug(bad), Err(ValidationError::InvalidSlug(_))),
                "{} should be rejected",
                bad
            );
        }
        assert!(validate_slug("spring-sale-2024").is_ok());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Spring Sale: 20% off!"), "spring-sale-20-off");
        assert_eq!(slugify("  "), "");
        assert!(validate_slug(&slugify("Monthly Newsletter #3")).is_ok());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryDesignStore::new();
        store.save(request("Welcome", "welcome")).await.unwrap();

        let loaded = store.load("welcome").await.unwrap();
        assert_eq!(loaded.name, "Welcome");
        assert_eq!(store.list().await.unwrap(), vec!["welcome".to_string()]);
        assert!(matches!(store.load("missing").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_store_rejects_invalid_requests() {
        let store = MemoryDesignStore::new();
        let err = store.save(request("", "welcome")).await;
        assert!(matches!(err, Err(StoreError::Validation(ValidationError::MissingName))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_markup_write_leaves_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDesignStore::new(dir.path());
        // A directory where the markup file belongs makes that write fail
        std::fs::create_dir_all(dir.path().join("welcome.html")).unwrap();

        assert!(matches!(store.save(request("Welcome", "welcome")).await, Err(StoreError::Io(_))));
        assert!(!dir.path().join("welcome.json").exists());
        assert!(store.list().await.unwrap().is_empty());
        assert!(matches!(store.load("welcome").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_store_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDesignStore::new(dir.path());
        store.save(request("Welcome", "welcome")).await.unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["welcome.html", "welcome.json"]);
    }
}
