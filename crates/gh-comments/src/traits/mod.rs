//! Collaborator traits the renderer and model are instrumented with.

mod avatar;
mod emoji;
mod error;
mod file_system;
mod language;
mod observer;
mod repository;

pub use avatar::{AvatarProvider, GitHubAvatarProvider, NoOpAvatarProvider};
pub use emoji::{BuiltinEmojiLoader, EmojiCache, EmojiLoader, EmojiTable, JsonEmojiLoader};
pub use error::LookupError;
pub use file_system::{FileKind, FileSystem, LocalFileSystem};
pub use language::{ExtensionLanguageDetector, LanguageDetector};
pub use observer::{NoOpObserver, ThreadObserver};
pub use repository::RemoteRepository;
