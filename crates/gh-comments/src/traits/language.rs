//! Trait for detecting the language of the document a thread is attached to.

use async_trait::async_trait;
use std::path::Path;

/// Detects the editor language identifier of a document.
///
/// Language identifiers follow the usual editor conventions
/// (`"typescript"`, `"javascriptreact"`, `"php"`, `"rust"`, ...).
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Language identifier of the document at `path`, if known.
    async fn language_id(&self, path: &str) -> Option<String>;
}

/// Detects languages from file extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionLanguageDetector;

impl ExtensionLanguageDetector {
    fn language_for_extension(extension: &str) -> Option<&'static str> {
        let language = match extension.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => "javascript",
            "jsx" => "javascriptreact",
            "ts" | "mts" | "cts" => "typescript",
            "tsx" => "typescriptreact",
            "php" | "phtml" => "php",
            "rs" => "rust",
            "py" => "python",
            "go" => "go",
            "rb" => "ruby",
            "java" => "java",
            "kt" | "kts" => "kotlin",
            "c" | "h" => "c",
            "cc" | "cpp" | "cxx" | "hpp" => "cpp",
            "cs" => "csharp",
            "swift" => "swift",
            "md" | "markdown" => "markdown",
            "json" => "json",
            "toml" => "toml",
            "yml" | "yaml" => "yaml",
            "sh" | "bash" => "shellscript",
            _ => return None,
        };
        Some(language)
    }
}

#[async_trait]
impl LanguageDetector for ExtensionLanguageDetector {
    async fn language_id(&self, path: &str) -> Option<String> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::language_for_extension)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extension_detection() {
        let detector = ExtensionLanguageDetector;
        assert_eq!(
            detector.language_id("src/index.ts").await.as_deref(),
            Some("typescript")
        );
        assert_eq!(
            detector.language_id("web/App.JSX").await.as_deref(),
            Some("javascriptreact")
        );
        assert_eq!(detector.language_id("index.php").await.as_deref(), Some("php"));
        assert_eq!(detector.language_id("Makefile").await, None);
        assert_eq!(detector.language_id("notes.unknown").await, None);
    }
}
