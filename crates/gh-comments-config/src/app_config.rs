//! Application configuration
//!
//! Configuration loaded from .gh-comments.toml file.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from .gh-comments.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// GitHub host the comments live on (e.g., "github.com", "ghe.example.com")
    #[serde(default = "default_host")]
    pub host: String,

    /// Local checkout of the repository; enables local file links for permalinks
    #[serde(default)]
    pub workspace_root: Option<String>,

    /// JSON file mapping emoji shortcodes to glyphs (built-in table if unset)
    #[serde(default)]
    pub emoji_file: Option<String>,

    /// Avatar edge length in pixels
    #[serde(default = "default_avatar_size")]
    pub avatar_size: u32,
}

fn default_host() -> String {
    "github.com".to_string()
}

fn default_avatar_size() -> u32 {
    28
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            workspace_root: None,
            emoji_file: None,
            avatar_size: default_avatar_size(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content),
            None => {
                log::debug!("Using default app config");
                Self::default()
            }
        }
    }

    /// Parse config content, falling back to defaults when it is invalid
    pub fn parse(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded app config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }
}
