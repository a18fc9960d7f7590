//! Emoji table loading and caching.

use crate::traits::LookupError;
use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Maps shortcodes (without colons, e.g. `"rocket"`) to glyphs.
pub type EmojiTable = HashMap<String, String>;

/// Loads an emoji table.
#[async_trait]
pub trait EmojiLoader: Send + Sync {
    async fn load(&self) -> Result<EmojiTable, LookupError>;
}

/// Loads a table once and keeps it for the lifetime of the cache.
///
/// Share one cache (behind an `Arc`) between all renderers so the table is
/// loaded at most once per process. A failed load is logged and cached as an
/// empty table; shortcodes are then left as text.
pub struct EmojiCache {
    loader: Arc<dyn EmojiLoader>,
    table: OnceCell<EmojiTable>,
}

impl EmojiCache {
    pub fn new(loader: Arc<dyn EmojiLoader>) -> Self {
        Self {
            loader,
            table: OnceCell::new(),
        }
    }

    /// The emoji table, loading it on first use.
    pub async fn table(&self) -> &EmojiTable {
        self.table
            .get_or_init(|| async {
                match self.loader.load().await {
                    Ok(table) => {
                        debug!("Loaded emoji table with {} entries", table.len());
                        table
                    }
                    Err(e) => {
                        warn!("Failed to load emoji table: {}", e);
                        EmojiTable::new()
                    }
                }
            })
            .await
    }

    /// Whether the table has been loaded already.
    pub fn is_loaded(&self) -> bool {
        self.table.initialized()
    }
}

impl Default for EmojiCache {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinEmojiLoader))
    }
}

/// A small built-in table covering the shortcodes most used in reviews.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEmojiLoader;

const BUILTIN_EMOJI: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("thumbsup", "👍"),
    ("-1", "👎"),
    ("thumbsdown", "👎"),
    ("smile", "😄"),
    ("laughing", "😆"),
    ("tada", "🎉"),
    ("confused", "😕"),
    ("heart", "❤️"),
    ("rocket", "🚀"),
    ("eyes", "👀"),
    ("white_check_mark", "✅"),
    ("heavy_check_mark", "✔️"),
    ("x", "❌"),
    ("warning", "⚠️"),
    ("bug", "🐛"),
    ("fire", "🔥"),
    ("sparkles", "✨"),
    ("memo", "📝"),
    ("bulb", "💡"),
    ("thinking", "🤔"),
    ("pray", "🙏"),
    ("clap", "👏"),
    ("wave", "👋"),
    ("100", "💯"),
    ("construction", "🚧"),
    ("recycle", "♻️"),
    ("lock", "🔒"),
    ("zap", "⚡"),
    ("boom", "💥"),
    ("question", "❓"),
    ("exclamation", "❗"),
    ("ship", "🚢"),
    ("mag", "🔍"),
    ("wrench", "🔧"),
    ("hammer", "🔨"),
    ("package", "📦"),
    ("art", "🎨"),
    ("smiley", "😃"),
    ("wink", "😉"),
    ("slightly_smiling_face", "🙂"),
    ("see_no_evil", "🙈"),
];

#[async_trait]
impl EmojiLoader for BuiltinEmojiLoader {
    async fn load(&self) -> Result<EmojiTable, LookupError> {
        Ok(BUILTIN_EMOJI
            .iter()
            .map(|(code, glyph)| (code.to_string(), glyph.to_string()))
            .collect())
    }
}

/// Loads a JSON object of `"shortcode": "glyph"` pairs from disk.
#[derive(Debug, Clone)]
pub struct JsonEmojiLoader {
    path: PathBuf,
}

impl JsonEmojiLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EmojiLoader for JsonEmojiLoader {
    async fn load(&self) -> Result<EmojiTable, LookupError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content).map_err(|e| {
            LookupError::InvalidData(format!("{}: {}", self.path.display(), e))
        })
    }
}
