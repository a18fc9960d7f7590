//! Permalinks to lines of a file at a specific commit.

use crate::traits::{FileKind, FileSystem, RemoteRepository};
use futures::future::join_all;
use log::debug;
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::sync::{Arc, OnceLock};

fn permalink_regex() -> &'static Regex {
    static PERMALINK_REGEX: OnceLock<Regex> = OnceLock::new();

    PERMALINK_REGEX.get_or_init(|| {
        Regex::new(
            r"https://(?P<host>[^/\s]+)/(?P<owner>[^/\s]+)/(?P<repo>[^/\s]+)/blob/(?P<sha>[0-9a-f]{40})/(?P<path>[^#\s]+)#L(?P<start>[0-9]+)(?:-L(?P<end>[0-9]+))?",
        )
        .unwrap()
    })
}

/// A permalink found in a comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    /// Byte range of the URL in the body.
    pub span: Range<usize>,
    pub url: String,
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub path: String,
    pub start_line: u32,
    pub end_line: Option<u32>,
}

impl Permalink {
    /// Last line of the referenced range.
    pub fn last_line(&self) -> u32 {
        self.end_line.unwrap_or(self.start_line)
    }

    fn caption(&self) -> String {
        let short_sha = &self.sha[..7];
        match self.end_line {
            Some(end) => format!("Lines {} to {} in `{}`", self.start_line, end, short_sha),
            None => format!("Line {} in `{}`", self.start_line, short_sha),
        }
    }

    fn fence_language(&self) -> &str {
        Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
    }
}

/// Find permalinks that are not already the target of a markdown link.
pub fn find_permalinks(body: &str) -> Vec<Permalink> {
    permalink_regex()
        .captures_iter(body)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            if body[..whole.start()].ends_with('(') {
                return None;
            }

            Some(Permalink {
                span: whole.range(),
                url: whole.as_str().to_string(),
                host: captures["host"].to_string(),
                owner: captures["owner"].to_string(),
                repo: captures["repo"].to_string(),
                sha: captures["sha"].to_string(),
                path: captures["path"].to_string(),
                start_line: captures["start"].parse().ok()?,
                end_line: match captures.name("end") {
                    Some(end) => Some(end.as_str().parse().ok()?),
                    None => None,
                },
            })
        })
        .collect()
}

/// Expand permalinks into a link plus an excerpt of the referenced lines.
///
/// Links into unknown repositories and failed fetches stay as they are.
/// All links are resolved concurrently.
pub async fn expand_permalinks(
    body: &str,
    repositories: &[Arc<dyn RemoteRepository>],
    file_system: &dyn FileSystem,
) -> String {
    if repositories.is_empty() {
        return body.to_string();
    }

    let permalinks = find_permalinks(body);
    if permalinks.is_empty() {
        return body.to_string();
    }

    let replacements = join_all(
        permalinks
            .iter()
            .map(|permalink| expand_permalink(permalink, repositories, file_system)),
    )
    .await;

    let mut out = String::with_capacity(body.len());
    let mut cursor = 0;
    for (permalink, replacement) in permalinks.iter().zip(replacements) {
        out.push_str(&body[cursor..permalink.span.start]);
        match replacement {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(&permalink.url),
        }
        cursor = permalink.span.end;
    }
    out.push_str(&body[cursor..]);
    out
}

async fn expand_permalink(
    permalink: &Permalink,
    repositories: &[Arc<dyn RemoteRepository>],
    file_system: &dyn FileSystem,
) -> Option<String> {
    let Some(repository) = repositories
        .iter()
        .find(|repo| repo.is(&permalink.host, &permalink.owner, &permalink.repo))
    else {
        debug!("Permalink into unknown repository: {}", permalink.url);
        return None;
    };

    let lines = match repository
        .get_lines(
            &permalink.sha,
            &permalink.path,
            permalink.start_line,
            permalink.last_line(),
        )
        .await
    {
        Ok(Some(lines)) => lines,
        Ok(None) => {
            debug!("No lines to show for permalink {}", permalink.url);
            return None;
        }
        Err(e) => {
            debug!("Failed to fetch lines for permalink {}: {}", permalink.url, e);
            return None;
        }
    };

    let target = match local_file_link(repository.as_ref(), permalink, file_system).await {
        Some(link) => link,
        None => permalink.url.clone(),
    };

    Some(format!(
        "\n***\n[{}]({})\n\n{}\n```{}\n{}\n```\n***",
        permalink.path,
        target,
        permalink.caption(),
        permalink.fence_language(),
        lines
    ))
}

/// `file://` link with a line range fragment, if the file exists locally.
async fn local_file_link(
    repository: &dyn RemoteRepository,
    permalink: &Permalink,
    file_system: &dyn FileSystem,
) -> Option<String> {
    let path = repository.local_root()?.join(&permalink.path);

    match file_system.stat(&path).await {
        Ok(FileKind::File) => Some(format!(
            "file://{}#{}-{}",
            path.display(),
            permalink.start_line,
            permalink.last_line()
        )),
        Ok(_) => None,
        Err(e) => {
            debug!("Failed to stat {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LookupError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

    struct FakeRepository {
        local_root: Option<PathBuf>,
        content: &'static str,
    }

    #[async_trait]
    impl RemoteRepository for FakeRepository {
        fn host(&self) -> &str {
            "github.com"
        }

        fn owner(&self) -> &str {
            "octocat"
        }

        fn repository_name(&self) -> &str {
            "hello"
        }

        fn local_root(&self) -> Option<&Path> {
            self.local_root.as_deref()
        }

        async fn get_lines(
            &self,
            sha: &str,
            path: &str,
            start_line: u32,
            end_line: u32,
        ) -> Result<Option<String>, LookupError> {
            if sha != SHA || path != "src/lib.rs" {
                return Err(LookupError::NotFound(path.to_string()));
            }
            let lines: Vec<&str> = self
                .content
                .lines()
                .skip(start_line as usize - 1)
                .take((end_line - start_line + 1) as usize)
                .collect();
            Ok((!lines.is_empty()).then(|| lines.join("\n")))
        }
    }

    struct FakeFileSystem {
        kind: Option<FileKind>,
    }

    #[async_trait]
    impl FileSystem for FakeFileSystem {
        async fn stat(&self, path: &Path) -> Result<FileKind, LookupError> {
            self.kind
                .ok_or_else(|| LookupError::NotFound(path.display().to_string()))
        }
    }

    fn repositories(local_root: Option<&str>) -> Vec<Arc<dyn RemoteRepository>> {
        vec![Arc::new(FakeRepository {
            local_root: local_root.map(PathBuf::from),
            content: "fn one() {}\nfn two() {}\nfn three() {}\n",
        })]
    }

    fn url(path: &str, fragment: &str) -> String {
        format!("https://github.com/octocat/hello/blob/{}/{}#{}", SHA, path, fragment)
    }

    #[test]
    fn test_find_permalinks() {
        let body = format!("see {} and [x]({})", url("src/lib.rs", "L2-L3"), url("a.rs", "L1"));
        let found = find_permalinks(&body);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].owner, "octocat");
        assert_eq!(found[0].path, "src/lib.rs");
        assert_eq!(found[0].start_line, 2);
        assert_eq!(found[0].end_line, Some(3));
        assert_eq!(&body[found[0].span.clone()], url("src/lib.rs", "L2-L3"));
    }

    #[test]
    fn test_non_matching_urls() {
        let body = "https://github.com/octocat/hello/blob/main/src/lib.rs#L2 \
                    https://github.com/octocat/hello/blob/0123/src/lib.rs#L2";
        assert!(find_permalinks(body).is_empty());
    }

    #[tokio::test]
    async fn test_expands_single_line_with_remote_link() {
        let link = url("src/lib.rs", "L2");
        let body = format!("look: {}", link);
        let fs = FakeFileSystem { kind: None };

        let expanded = expand_permalinks(&body, &repositories(None), &fs).await;

        assert_eq!(
            expanded,
            format!(
                "look: \n***\n[src/lib.rs]({})\n\nLine 2 in `0123456`\n```rs\nfn two() {{}}\n```\n***",
                link
            )
        );
    }

    #[tokio::test]
    async fn test_expands_range_with_local_link() {
        let body = url("src/lib.rs", "L1-L2");
        let fs = FakeFileSystem {
            kind: Some(FileKind::File),
        };

        let expanded = expand_permalinks(&body, &repositories(Some("/work/hello")), &fs).await;

        assert!(expanded.contains("[src/lib.rs](file:///work/hello/src/lib.rs#1-2)"));
        assert!(expanded.contains("Lines 1 to 2 in `0123456`"));
        assert!(expanded.contains("fn one() {}\nfn two() {}"));
    }

    #[tokio::test]
    async fn test_directory_falls_back_to_remote_link() {
        let link = url("src/lib.rs", "L1");
        let fs = FakeFileSystem {
            kind: Some(FileKind::Directory),
        };

        let expanded = expand_permalinks(&link, &repositories(Some("/work/hello")), &fs).await;
        assert!(expanded.contains(&format!("[src/lib.rs]({})", link)));
    }

    #[tokio::test]
    async fn test_failures_leave_text_unchanged() {
        let fs = FakeFileSystem { kind: None };
        let unknown_repo = format!(
            "https://github.com/someone/else/blob/{}/src/lib.rs#L1",
            SHA
        );
        let missing_file = url("src/missing.rs", "L1");
        let past_end = url("src/lib.rs", "L40");
        let body = format!("{}\n{}\n{}", unknown_repo, missing_file, past_end);

        assert_eq!(expand_permalinks(&body, &repositories(None), &fs).await, body);
        assert_eq!(expand_permalinks(&body, &[], &fs).await, body);
    }

    #[tokio::test]
    async fn test_multiple_links_keep_order() {
        let fs = FakeFileSystem { kind: None };
        let body = format!(
            "first {} then {} end",
            url("src/lib.rs", "L1"),
            url("src/lib.rs", "L3")
        );

        let expanded = expand_permalinks(&body, &repositories(None), &fs).await;
        let one = expanded.find("fn one()").unwrap();
        let three = expanded.find("fn three()").unwrap();

        assert!(expanded.starts_with("first \n***"));
        assert!(expanded.ends_with("*** end"));
        assert!(one < three);
    }
}
