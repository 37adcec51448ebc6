//! Posting a comparison result as a comment on a GitHub issue or PR.

use std::time::Duration;

use anyhow::{Context, Result};

/// Coordinates and credentials for one comment.
#[derive(Debug, Clone)]
pub struct CommentTarget {
    pub owner: String,
    pub repo: String,
    pub issue: u64,
    pub token: String,
}

impl CommentTarget {
    /// Assemble a target from the optional CLI flags. Posting only happens
    /// when all four are present and non-empty.
    pub fn from_flags(
        owner: Option<String>,
        repo: Option<String>,
        issue: Option<u64>,
        token: Option<String>,
    ) -> Option<Self> {
        match (owner, repo, issue, token) {
            (Some(owner), Some(repo), Some(issue), Some(token))
                if !owner.is_empty() && !repo.is_empty() && issue != 0 && !token.is_empty() =>
            {
                Some(CommentTarget {
                    owner,
                    repo,
                    issue,
                    token,
                })
            }
            _ => None,
        }
    }

    fn comments_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/issues/{}/comments",
            self.owner, self.repo, self.issue
        )
    }
}

/// Post `body` verbatim as a comment. One call, no retry; the caller
/// decides whether a failure matters.
pub fn add_comment(target: &CommentTarget, body: &str) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(concat!("lightkeeper/", env!("CARGO_PKG_VERSION")))
        .build()?;

    client
        .post(target.comments_url())
        .bearer_auth(&target.token)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .json(&serde_json::json!({ "body": body }))
        .send()
        .context("Failed to reach the GitHub API")?
        .error_for_status()
        .context("GitHub rejected the comment")?;

    Ok(())
}
