//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-comments/`
//! - macOS: `~/Library/Application Support/gh-comments/`
//! - Windows: `%APPDATA%\gh-comments\`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "gh-comments";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    Ok(dir)
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to the user-provided emoji table (shortcode → glyph JSON)
///
/// Only computes the location; nothing is created on disk.
pub fn default_emoji_table_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| emoji_table_path_in(&base))
}

fn emoji_table_path_in(base: &Path) -> PathBuf {
    base.join(APP_NAME).join("emoji.json")
}
