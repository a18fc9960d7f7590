//! Command line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gh-comment-preview")]
#[command(version)]
#[command(about = "Render pull request review comments as markdown", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the review comments of a pull request
    Pr {
        /// Repository owner
        #[arg(short, long)]
        owner: String,

        /// Repository name
        #[arg(short, long)]
        repo: String,

        /// Pull request number
        #[arg(short, long)]
        number: u64,

        /// GitHub host (overrides the configured host)
        #[arg(long)]
        host: Option<String>,
    },

    /// Render a thread read from a JSON file of comments
    File {
        /// JSON array of comments
        #[arg(short, long)]
        path: PathBuf,

        /// Document the thread is attached to (used for language detection)
        #[arg(short, long, default_value = "comments")]
        document: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pr_command() {
        let args = Args::parse_from([
            "gh-comment-preview",
            "pr",
            "--owner",
            "octocat",
            "--repo",
            "hello",
            "--number",
            "42",
        ]);

        match args.command {
            Commands::Pr {
                owner,
                repo,
                number,
                host,
            } => {
                assert_eq!(owner, "octocat");
                assert_eq!(repo, "hello");
                assert_eq!(number, 42);
                assert_eq!(host, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_file_command_defaults() {
        let args = Args::parse_from(["gh-comment-preview", "file", "--path", "c.json"]);

        match args.command {
            Commands::File { path, document } => {
                assert_eq!(path, PathBuf::from("c.json"));
                assert_eq!(document, "comments");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
