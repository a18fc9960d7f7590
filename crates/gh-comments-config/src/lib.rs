//! Configuration and file locations for gh-comments
//!
//! This crate provides:
//! - File path utilities for config files (XDG via `dirs`)
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use paths::{app_config_path, config_dir, default_emoji_table_path};
