use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailframe.config.json";

/// Mailframe configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing design documents (`*.json`)
    #[serde(default = "default_designs_dir")]
    pub designs_dir: String,

    /// Where compiled HTML is written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Saved design records
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// JSON manifest listing media assets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_manifest: Option<String>,

    /// Pretty print compiled HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_designs_dir() -> String {
    "designs".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_store_dir() -> String {
    ".mailframe/store".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_designs_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.designs_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn get_assets_manifest(&self, cwd: &str) -> Option<PathBuf> {
        self.assets_manifest.as_ref().map(|path| PathBuf::from(cwd).join(path))
    }

    /// Resolve a design argument: an existing path as given, otherwise a
    /// name inside the designs directory
    pub fn resolve_design(&self, cwd: &str, design: &str) -> PathBuf {
        let direct = PathBuf::from(cwd).join(design);
        if direct.exists() {
            return direct;
        }

        let in_designs = self.get_designs_dir(cwd).join(design);
        if in_designs.extension().is_some() {
            in_designs
        } else {
            in_designs.with_extension("json")
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            designs_dir: default_designs_dir(),
            out_dir: default_out_dir(),
            store_dir: default_store_dir(),
            assets_manifest: None,
            pretty: default_pretty(),
        }
    }
}
