//! GitHub API client for review comment rendering
//!
//! This crate provides a trait-based GitHub API client. Consumers depend on
//! the [`GitHubClient`] trait so that tests can substitute an in-memory fake
//! for the octocrab-backed implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_review_comments()                       │
//! │  - fetch_file_contents()                         │
//! │  - fetch_current_user()                          │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │◄──── ClientManager (one per host)
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{ClientManager, GitHubClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut manager = ClientManager::new();
//! let client = manager.clone_client(None).await?;
//!
//! let comments = client.fetch_review_comments("owner", "repo", 42).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_manager;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::{slice_lines, GitHubClient};
pub use client_manager::{ClientManager, TokenResolver};
pub use octocrab_client::OctocrabClient;
pub use types::{ReactionRollup, ReviewComment, User};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
