//! Repository public-key cache.
//!
//! The platform hands out one public encryption key per repository. It is
//! fetched over the network at most once per run: the first caller installs
//! the pending fetch and every caller, concurrent or later, awaits and
//! shares that same resolution. A failed fetch leaves the cache empty, so
//! the next caller retries instead of sealing against a missing key.

use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::core::github::GitHubClient;
use crate::error::RemoteError;

/// The repository's current public encryption key.
///
/// Constructed only by [`KeyCache`] from a successful fetch; immutable for
/// the rest of the run and never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoPublicKey {
    key_id: String,
    key: String,
}

impl RepoPublicKey {
    /// Opaque identifier the platform assigned to this key. Must be echoed
    /// back unmodified on every write sealed with it.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Base64-encoded key material.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Write-once, per-run cache in front of the public-key endpoint.
#[derive(Debug, Default)]
pub struct KeyCache {
    cell: OnceCell<RepoPublicKey>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached key, fetching it on first use.
    ///
    /// Concurrent callers racing before the first resolution share a single
    /// in-flight request; all of them observe the same key material and id.
    pub async fn get_or_fetch(&self, client: &GitHubClient) -> Result<&RepoPublicKey, RemoteError> {
        self.cell
            .get_or_try_init(|| async {
                debug!(repo = %client.repo(), "fetching repository public key");

                let key: RepoPublicKey = client
                    .get_json(&["actions", "secrets", "public-key"])
                    .await
                    .map_err(|failure| RemoteError::Fetch {
                        what: "repository public key".to_string(),
                        failure,
                    })?;

                debug!(key_id = %key.key_id, "public key cached");
                Ok(key)
            })
            .await
    }

    /// The cached key, if a fetch has already succeeded.
    pub fn cached(&self) -> Option<&RepoPublicKey> {
        self.cell.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_deserializes_from_wire_format() {
        let json = r#"{"key_id": "568250167242549743", "key": "dGVzdC1rZXktbWF0ZXJpYWw="}"#;
        let key: RepoPublicKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.key_id(), "568250167242549743");
        assert_eq!(key.key(), "dGVzdC1rZXktbWF0ZXJpYWw=");
    }

    #[test]
    fn test_cache_starts_empty() {
        let cache = KeyCache::new();
        assert!(cache.cached().is_none());
    }
}
