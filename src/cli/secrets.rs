//! Secret read commands - list, get, delete.
//!
//! The platform only ever reports metadata; there is no value to show.

use crate::cli::output;
use crate::core::publish::Publisher;
use crate::error::Result;

/// List every secret in the repository.
///
/// No prefix filtering: the operator sees the repository as it is.
pub async fn list(publisher: &Publisher) -> Result<()> {
    let secrets = publisher.list().await?;

    if secrets.is_empty() {
        output::dimmed("no secrets in repository");
        return Ok(());
    }

    output::section("Secrets");
    for secret in &secrets {
        output::list_item(&format!(
            "{}  (updated {})",
            output::key(&secret.name),
            secret.updated_at.format("%Y-%m-%d")
        ));
    }

    Ok(())
}

/// Show one secret's metadata.
pub async fn get(publisher: &Publisher, name: &str) -> Result<()> {
    let secret = publisher.secret(name).await?;

    output::kv("name:", output::key(&secret.name));
    output::kv("created:", secret.created_at.to_rfc3339());
    output::kv("updated:", secret.updated_at.to_rfc3339());

    Ok(())
}

/// Delete a secret.
pub async fn delete(publisher: &Publisher, name: &str) -> Result<()> {
    publisher.delete(name).await?;
    output::success(&format!("deleted {}", output::key(&publisher.resolve_name(name))));
    Ok(())
}
