//! Connect command - liveness and auth check.

use crate::cli::output;
use crate::core::publish::Publisher;
use crate::error::Result;

/// Fetch repository metadata to prove the token and repository path work.
pub async fn execute(publisher: &Publisher) -> Result<()> {
    let repo = publisher.connect().await?;

    output::success(&format!("connected to {}", output::key(&repo.full_name)));
    output::kv("private:", repo.private);
    output::kv("default branch:", &repo.default_branch);

    Ok(())
}
