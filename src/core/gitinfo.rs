//! Git-derived defaults.
//!
//! The repository path and deployment stage can usually be derived from the
//! working copy: the `origin` remote names the GitHub repository, and the
//! checked-out branch selects the stage via the `[stages]` mapping.

use std::process::Command;

use tracing::debug;

use crate::error::ConfigError;

/// The currently checked-out branch name.
pub fn current_branch() -> Result<String, ConfigError> {
    let output = Command::new("git")
        .args(["branch", "--show-current"])
        .output()
        .map_err(|e| ConfigError::Git(format!("could not run git: {e}")))?;

    if !output.status.success() {
        return Err(ConfigError::Git("could not determine current branch".to_string()));
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() {
        // Detached HEAD has no branch to map to a stage.
        return Err(ConfigError::Git("not on a branch".to_string()));
    }

    debug!(%branch, "current branch");
    Ok(branch)
}

/// The `origin` remote URL, if the working copy has one.
pub fn origin_url() -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}

/// Derive `owner/repo` from a git remote URL.
///
/// Understands the three spellings git hands out in practice:
/// `https://github.com/owner/repo.git`, `git@github.com:owner/repo.git`,
/// and `ssh://git@github.com/owner/repo.git`.
pub fn repo_from_remote(url: &str) -> Option<String> {
    let path = if let Some(rest) = url.strip_prefix("https://").or(url.strip_prefix("http://")) {
        rest.split_once('/')?.1
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        rest.split_once('/')?.1
    } else if let Some((_, rest)) = url.split_once('@').filter(|(user, _)| !user.contains('/')) {
        // scp-like: git@host:owner/repo.git
        rest.split_once(':')?.1
    } else {
        return None;
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut segments = path.splitn(2, '/');
    let owner = segments.next()?;
    let repo = segments.next()?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }

    Some(format!("{owner}/{repo}"))
}

/// The repository path derived from the `origin` remote, if any.
pub fn origin_repo() -> Option<String> {
    let url = origin_url()?;
    let repo = repo_from_remote(&url);
    debug!(%url, repo = repo.as_deref().unwrap_or("<none>"), "origin remote");
    repo
}
