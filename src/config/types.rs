use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScannerConfig {
    /// Space-separated leading words dropped when computing sort keys.
    #[serde(default = "default_ignored_articles")]
    pub ignored_articles: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            ignored_articles: default_ignored_articles(),
        }
    }
}

fn default_ignored_articles() -> String {
    "The El La Los Las Le Les Os As O A".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file holding resolved genres.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("tagscan.db")
}
