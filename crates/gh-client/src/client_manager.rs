//! Multi-host GitHub client manager
//!
//! Review comments may link to repositories on github.com or on a GitHub
//! Enterprise host. Clients are lazily initialized and kept per host.

use crate::{OctocrabClient, DEFAULT_HOST};
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. `gh auth token --hostname {host}` command
/// 3. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new() -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok();

        Self { default_token }
    }

    /// Get a token for the given host
    ///
    /// # Arguments
    ///
    /// * `host` - The GitHub host (None = github.com)
    ///
    /// # Token Resolution Order
    ///
    /// 1. `GITHUB_TOKEN_{HOST}` env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
    /// 2. `gh auth token --hostname {host}` command
    /// 3. `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
    pub async fn get_token(&self, host: Option<&str>) -> Result<String> {
        let host = host.unwrap_or(DEFAULT_HOST);

        // Try host-specific env var
        let env_key = host_env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            debug!("Using token from env var {} for host {}", env_key, host);
            return Ok(token);
        }

        // Try gh CLI with hostname
        debug!("Trying gh auth token for host {}", host);
        match tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8(output.stdout)
                    .context("Invalid UTF-8 in gh auth token output")?
                    .trim()
                    .to_string();
                if !token.is_empty() {
                    debug!("Using token from gh CLI for host {}", host);
                    return Ok(token);
                }
            }
            Ok(_) => debug!("gh auth token returned no token for host {}", host),
            Err(e) => debug!("Failed to run 'gh auth token': {}", e),
        }

        // Fallback to default token (for github.com only)
        if host == DEFAULT_HOST {
            if let Some(ref token) = self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Ok(token.clone());
            }
        }

        Err(anyhow::anyhow!(
            "No token found for host '{}'. \
             Set {} or run 'gh auth login --hostname {}'",
            host,
            env_key,
            host
        ))
    }
}

/// Environment variable holding a token for a specific host
fn host_env_key(host: &str) -> String {
    format!(
        "GITHUB_TOKEN_{}",
        host.replace(['.', '-'], "_").to_uppercase()
    )
}

/// Manages GitHub API clients for multiple hosts
///
/// Lazily creates and keeps one client per host. Each client is configured
/// with the appropriate base URL and authentication token.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::ClientManager;
///
/// let mut manager = ClientManager::new();
///
/// // Client for github.com
/// let client = manager.clone_client(None).await?;
///
/// // Client for an enterprise host
/// let ghe_client = manager.clone_client(Some("ghe.example.com")).await?;
/// ```
#[derive(Default)]
pub struct ClientManager {
    /// Clients per host
    clients: HashMap<String, OctocrabClient>,
    /// Token resolver
    tokens: TokenResolver,
}

impl ClientManager {
    /// Create a new, empty client manager
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            tokens: TokenResolver::new(),
        }
    }

    /// Get a clone of the client for the given host, creating it on first use
    ///
    /// The returned client is owned so it can be moved into async tasks or
    /// wrapped in an `Arc<dyn GitHubClient>`.
    pub async fn clone_client(&mut self, host: Option<&str>) -> Result<OctocrabClient> {
        let key = host_key(host);

        if let Some(client) = self.clients.get(key) {
            return Ok(client.clone());
        }

        let client = self.create_client(host).await?;
        self.clients.insert(key.to_string(), client.clone());
        Ok(client)
    }

    /// Create a new client for the given host
    async fn create_client(&self, host: Option<&str>) -> Result<OctocrabClient> {
        let effective_host = host_key(host);
        info!("Creating GitHub client for host: {}", effective_host);

        let token = self.tokens.get_token(host).await?;
        let mut builder = Octocrab::builder().personal_token(token);

        let base_url = api_base_url(effective_host);
        if effective_host != DEFAULT_HOST {
            builder = builder.base_uri(&base_url).context("Failed to set base URI")?;
        }

        let octocrab = builder.build().context("Failed to build Octocrab client")?;

        info!("GitHub client created for host: {}", effective_host);
        Ok(OctocrabClient::new(Arc::new(octocrab)))
    }
}

fn host_key(host: Option<&str>) -> &str {
    host.unwrap_or(DEFAULT_HOST)
}

/// REST API base URL for a host
fn api_base_url(host: &str) -> String {
    if host == DEFAULT_HOST {
        "https://api.github.com".to_string()
    } else {
        format!("https://{}/api/v3", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_resolver_env_key_generation() {
        let hosts = [
            ("github.com", "GITHUB_TOKEN_GITHUB_COM"),
            ("ghe.example.com", "GITHUB_TOKEN_GHE_EXAMPLE_COM"),
            (
                "github-enterprise.corp.com",
                "GITHUB_TOKEN_GITHUB_ENTERPRISE_CORP_COM",
            ),
        ];

        for (host, expected_key) in hosts {
            assert_eq!(
                host_env_key(host),
                expected_key,
                "Host '{}' should produce key '{}'",
                host,
                expected_key
            );
        }
    }

    #[test]
    fn test_host_key_defaults_to_github() {
        assert_eq!(host_key(None), DEFAULT_HOST);
        assert_eq!(host_key(Some("ghe.example.com")), "ghe.example.com");
    }

    #[test]
    fn test_api_base_url() {
        assert_eq!(api_base_url("github.com"), "https://api.github.com");
        assert_eq!(
            api_base_url("ghe.example.com"),
            "https://ghe.example.com/api/v3"
        );
    }
}
