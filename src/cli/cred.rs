//! Cred command - publish AWS credentials from a local profile.

use crate::cli::output;
use crate::cli::write;
use crate::core::creds;
use crate::core::publish::Publisher;
use crate::error::Result;

/// Publish `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` from the named
/// profile of the shared credentials file.
pub async fn execute(publisher: &Publisher, profile: &str) -> Result<()> {
    let path = creds::credentials_path()?;
    output::dimmed(&format!("reading {}", path.display()));

    let pair = creds::read_profile(&path, profile)?;

    let entries = vec![
        ("AWS_ACCESS_KEY_ID".to_string(), pair.access_key_id),
        ("AWS_SECRET_ACCESS_KEY".to_string(), pair.secret_access_key),
    ];

    let outcomes = publisher.publish_all(entries).await;
    write::report(publisher, &outcomes)
}
