//! Write commands - publish secrets from a config document or a single
//! name/value pair.

use serde_yaml::Value;
use tracing::debug;

use crate::cli::output;
use crate::cli::Settings;
use crate::core::publish::{self, Publisher, SecretOutcome};
use crate::core::values::SecretValue;
use crate::error::{ConfigError, Result};

/// Publish every top-level entry of the stage's config document.
///
/// Entries are dispatched concurrently; one failing write never stops the
/// others. The exit status reflects partial failure.
pub async fn execute(publisher: &Publisher, settings: &Settings) -> Result<()> {
    let path = settings
        .config_file
        .as_ref()
        .ok_or_else(|| ConfigError::ConfigFileNotFound("no config file resolved".to_string()))?;

    if !path.exists() {
        return Err(ConfigError::ConfigFileNotFound(path.display().to_string()).into());
    }

    output::dimmed(&format!("reading {}", path.display()));
    let contents = std::fs::read_to_string(path)?;
    let doc: Value = serde_yaml::from_str(&contents)?;

    let invalid = |reason: &str| ConfigError::InvalidConfigDocument {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let Value::Mapping(doc) = doc else {
        return Err(invalid("expected a mapping of secret names to values").into());
    };

    let mut entries = Vec::with_capacity(doc.len());
    for (key, value) in &doc {
        let Value::String(name) = key else {
            return Err(invalid("secret names must be strings").into());
        };
        entries.push((name.clone(), SecretValue::from_yaml(name, value)?));
    }

    debug!(secrets = entries.len(), "publishing config document");
    let outcomes = publisher.publish_all(entries).await;
    report(publisher, &outcomes)
}

/// Publish a single name/value pair.
pub async fn one(publisher: &Publisher, name: &str, value: &str) -> Result<()> {
    publisher.publish(name, &SecretValue::from(value)).await?;
    output::success(&format!("wrote {}", output::key(&publisher.resolve_name(name))));
    Ok(())
}

/// Print one line per outcome, then fold into an exit result.
pub(crate) fn report(publisher: &Publisher, outcomes: &[SecretOutcome]) -> Result<()> {
    for outcome in outcomes {
        let resolved = publisher.resolve_name(&outcome.name);
        match &outcome.result {
            Ok(()) => output::success(&format!("wrote {}", output::key(&resolved))),
            Err(e) => output::error(&format!("{resolved}: {e}")),
        }
    }

    publish::batch_result(outcomes)
}
