use anyhow::{Context, Result};
use clap::Parser;
use gh_client::{ClientManager, GitHubClient};
use gh_comments::{raw_comment_from_review, GitHubRepository, RawComment, RemoteRepository};
use gh_comments_config::AppConfig;
use std::path::Path;
use std::sync::Arc;

mod cli;
mod logger;
mod preview;

use cli::{Args, Commands};
use preview::{group_threads, Previewer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the logger so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();
    logger::init();
    match dotenv {
        Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
        Err(_) => log::debug!(".env file not found, relying on environment variables"),
    }

    let args = Args::parse();
    let config = AppConfig::load();

    match args.command {
        Commands::Pr {
            owner,
            repo,
            number,
            host,
        } => {
            let host = host.unwrap_or_else(|| config.host.clone());
            preview_pull_request(&config, &host, &owner, &repo, number).await
        }
        Commands::File { path, document } => preview_file(&config, &path, &document).await,
    }
}

async fn preview_pull_request(
    config: &AppConfig,
    host: &str,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<()> {
    let mut manager = ClientManager::new();
    let client: Arc<dyn GitHubClient> = Arc::new(
        manager
            .clone_client(Some(host))
            .await
            .context("Failed to create GitHub client")?,
    );

    let viewer = match client.fetch_current_user().await {
        Ok(user) => Some(user.login),
        Err(e) => {
            log::warn!("Could not determine current user: {:#}", e);
            None
        }
    };

    let comments = client
        .fetch_review_comments(owner, repo, number)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch review comments of {}/{}#{}",
                owner, repo, number
            )
        })?;
    log::info!("Fetched {} review comments", comments.len());

    let mut repository = GitHubRepository::new(Arc::clone(&client), host, owner, repo);
    if let Some(root) = &config.workspace_root {
        repository = repository.with_local_root(root);
    }
    let repositories: Vec<Arc<dyn RemoteRepository>> = vec![Arc::new(repository)];
    let previewer = Previewer::new(config, repositories);

    for thread in group_threads(comments) {
        let raw_comments = thread
            .comments
            .iter()
            .map(|comment| raw_comment_from_review(comment, viewer.as_deref()))
            .collect();
        let markdown = previewer
            .render_thread(&thread.root_id.to_string(), &thread.path, raw_comments)
            .await?;
        println!("{}", markdown);
    }

    Ok(())
}

async fn preview_file(config: &AppConfig, path: &Path, document: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let comments: Vec<RawComment> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse comments from {}", path.display()))?;

    let previewer = Previewer::new(config, Vec::new());
    let markdown = previewer.render_thread("file", document, comments).await?;
    println!("{}", markdown);

    Ok(())
}
