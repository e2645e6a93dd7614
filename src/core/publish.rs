//! Secret sealing and publishing.
//!
//! Every write funnels through [`Publisher::publish`]: stringified value,
//! shared key fetch, seal, naming transform, upsert. The read, list, and
//! delete operations share the same naming transform but skip sealing.

use futures::future;
use tracing::debug;

use crate::core::github::{EncryptedSecret, GitHubClient, Repository, SecretMetadata};
use crate::core::keys::KeyCache;
use crate::core::seal;
use crate::core::values::SecretValue;
use crate::error::{Error, Result};

/// Outcome of one entry in a batch publish.
#[derive(Debug)]
pub struct SecretOutcome {
    /// The raw (pre-transform) secret name.
    pub name: String,
    pub result: Result<()>,
}

/// Seals secret values against the repository key and performs the remote
/// operations, applying the configured name prefix throughout.
pub struct Publisher {
    client: GitHubClient,
    keys: KeyCache,
    prefix: String,
}

impl Publisher {
    /// An empty `prefix` disables the naming transform.
    pub fn new(client: GitHubClient, prefix: impl Into<String>) -> Self {
        Self {
            client,
            keys: KeyCache::new(),
            prefix: prefix.into(),
        }
    }

    /// Apply the naming transform to a raw secret name.
    ///
    /// Applied to every name-bearing operation, never to config-document
    /// parsing.
    pub fn resolve_name(&self, raw: &str) -> String {
        if self.prefix.is_empty() {
            raw.to_string()
        } else {
            format!("{}{}", self.prefix, raw)
        }
    }

    /// Seal `value` and upsert it under the resolved name.
    ///
    /// A single attempt: failures surface with the platform's status and
    /// are never retried here.
    pub async fn publish(&self, raw_name: &str, value: &SecretValue) -> Result<()> {
        let key = self.keys.get_or_fetch(&self.client).await?;
        let encrypted_value = seal::seal(value.as_bytes(), key.key())?;

        let name = self.resolve_name(raw_name);
        debug!(secret = %name, key_id = %key.key_id(), "writing encrypted secret");

        let payload = EncryptedSecret {
            encrypted_value,
            key_id: key.key_id().to_string(),
        };
        self.client.put_secret(&name, &payload).await?;

        Ok(())
    }

    /// Publish a batch concurrently, one outcome per entry in input order.
    ///
    /// A failing entry never short-circuits the rest; partial success is
    /// expected and visible in the returned outcomes.
    pub async fn publish_all(&self, entries: Vec<(String, SecretValue)>) -> Vec<SecretOutcome> {
        let publishes = entries.into_iter().map(|(name, value)| async move {
            let result = self.publish(&name, &value).await;
            SecretOutcome { name, result }
        });

        future::join_all(publishes).await
    }

    /// Fetch one secret's metadata. The platform stores no recoverable
    /// plaintext, so there is no value to return.
    pub async fn secret(&self, raw_name: &str) -> Result<SecretMetadata> {
        let name = self.resolve_name(raw_name);
        Ok(self.client.secret(&name).await?)
    }

    /// List every secret in the repository.
    pub async fn list(&self) -> Result<Vec<SecretMetadata>> {
        Ok(self.client.secrets().await?.secrets)
    }

    /// Delete a secret under the resolved name.
    pub async fn delete(&self, raw_name: &str) -> Result<()> {
        let name = self.resolve_name(raw_name);
        self.client.delete_secret(&name).await?;
        Ok(())
    }

    /// Liveness and auth check against the repository itself.
    pub async fn connect(&self) -> Result<Repository> {
        Ok(self.client.repository().await?)
    }
}

/// Fold batch outcomes into a single result for exit-code purposes.
pub fn batch_result(outcomes: &[SecretOutcome]) -> Result<()> {
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed == 0 {
        Ok(())
    } else {
        Err(Error::PartialFailure {
            failed,
            total: outcomes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher(prefix: &str) -> Publisher {
        let client = GitHubClient::new(
            "https://api.github.com",
            "token",
            "acme/widgets".parse().unwrap(),
        )
        .unwrap();
        Publisher::new(client, prefix)
    }

    #[test]
    fn test_resolve_name_applies_prefix() {
        let p = publisher("staging-");
        assert_eq!(p.resolve_name("API_KEY"), "staging-API_KEY");
    }

    #[test]
    fn test_resolve_name_empty_prefix_is_identity() {
        let p = publisher("");
        assert_eq!(p.resolve_name("API_KEY"), "API_KEY");
    }

    #[test]
    fn test_resolve_name_is_deterministic() {
        let p = publisher("prod_");
        assert_eq!(p.resolve_name("DB_URL"), p.resolve_name("DB_URL"));
    }

    #[test]
    fn test_batch_result_all_ok() {
        let outcomes = vec![SecretOutcome {
            name: "A".to_string(),
            result: Ok(()),
        }];
        assert!(batch_result(&outcomes).is_ok());
    }

    #[test]
    fn test_batch_result_counts_failures() {
        let outcomes = vec![
            SecretOutcome {
                name: "A".to_string(),
                result: Ok(()),
            },
            SecretOutcome {
                name: "B".to_string(),
                result: Err(crate::error::ConfigError::MissingToken.into()),
            },
        ];

        match batch_result(&outcomes) {
            Err(Error::PartialFailure { failed, total }) => {
                assert_eq!(failed, 1);
                assert_eq!(total, 2);
            }
            other => panic!("expected partial failure, got {other:?}"),
        }
    }
}
