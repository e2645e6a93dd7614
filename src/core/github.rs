//! Authenticated GitHub API client.
//!
//! Every remote operation funnels through the generic call helpers here,
//! which map non-2xx responses and transport failures into [`CallFailure`]
//! so each call site only decides which error kind the failure becomes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::core::constants;
use crate::error::{CallFailure, ConfigError, RemoteError};

const GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("capstan/", env!("CARGO_PKG_VERSION"));

/// A repository path in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    owner: String,
    name: String,
}

impl RepoPath {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::str::FromStr for RepoPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepoPath(s.to_string());

        let (owner, name) = s.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty()
            || name.is_empty()
            || name.contains('/')
            || s.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Encrypted secret payload for the upsert endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EncryptedSecret {
    pub encrypted_value: String,
    pub key_id: String,
}

/// Secret metadata as reported by the platform.
///
/// The platform never returns a secret's value, encrypted or not.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response of the secret list endpoint.
#[derive(Debug, Deserialize)]
pub struct SecretList {
    pub total_count: u32,
    pub secrets: Vec<SecretMetadata>,
}

/// Repository metadata, used as a liveness and auth check.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub private: bool,
    pub default_branch: String,
}

/// Authenticated client for one repository's secret store.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    token: String,
    repo: RepoPath,
}

impl GitHubClient {
    /// Build a client for `repo` against `api_url`.
    ///
    /// Every request carries the bearer token and a bounded timeout.
    pub fn new(
        api_url: &str,
        token: impl Into<String>,
        repo: RepoPath,
    ) -> Result<Self, ConfigError> {
        let api_url =
            Url::parse(api_url).map_err(|_| ConfigError::InvalidApiUrl(api_url.to_string()))?;
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiUrl(api_url.to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(constants::REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            api_url,
            token: token.into(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoPath {
        &self.repo
    }

    /// Build a URL under the API base from path segments.
    ///
    /// Segments are percent-escaped individually, so secret names are safe
    /// to splice into the path.
    fn url(&self, tail: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .expect("base URL validated in new")
            .pop_if_empty()
            .extend(
                ["repos", self.repo.owner(), self.repo.name()]
                    .iter()
                    .chain(tail),
            );
        url
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, CallFailure> {
        let status = response.status();
        debug!(%status, "response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(CallFailure::Status(status.as_u16()))
        }
    }

    /// GET a repository-scoped path and deserialize the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        tail: &[&str],
    ) -> Result<T, CallFailure> {
        let url = self.url(tail);
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// PUT a JSON body to a repository-scoped path, ignoring the response
    /// body.
    pub(crate) async fn put_json<B: Serialize>(
        &self,
        tail: &[&str],
        body: &B,
    ) -> Result<(), CallFailure> {
        let url = self.url(tail);
        debug!(%url, "PUT");

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .json(body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// DELETE a repository-scoped path.
    pub(crate) async fn delete(&self, tail: &[&str]) -> Result<(), CallFailure> {
        let url = self.url(tail);
        debug!(%url, "DELETE");

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// List the repository's secrets. No prefix filtering happens here or
    /// anywhere else: callers see every secret in the repository.
    pub async fn secrets(&self) -> Result<SecretList, RemoteError> {
        self.get_json(&["actions", "secrets"])
            .await
            .map_err(|failure| RemoteError::Fetch {
                what: "secrets".to_string(),
                failure,
            })
    }

    /// Fetch one secret's metadata by its resolved name.
    pub async fn secret(&self, name: &str) -> Result<SecretMetadata, RemoteError> {
        self.get_json(&["actions", "secrets", name])
            .await
            .map_err(|failure| RemoteError::Fetch {
                what: format!("secret {name}"),
                failure,
            })
    }

    /// Upsert an encrypted secret under its resolved name.
    pub async fn put_secret(
        &self,
        name: &str,
        secret: &EncryptedSecret,
    ) -> Result<(), RemoteError> {
        self.put_json(&["actions", "secrets", name], secret)
            .await
            .map_err(|failure| RemoteError::Write {
                name: name.to_string(),
                failure,
            })
    }

    /// Delete a secret by its resolved name. Absence is reported exactly as
    /// the platform reports it, not masked.
    pub async fn delete_secret(&self, name: &str) -> Result<(), RemoteError> {
        self.delete(&["actions", "secrets", name])
            .await
            .map_err(|failure| RemoteError::Delete {
                name: name.to_string(),
                failure,
            })
    }

    /// Fetch repository metadata.
    pub async fn repository(&self) -> Result<Repository, RemoteError> {
        self.get_json(&[])
            .await
            .map_err(|failure| RemoteError::Fetch {
                what: format!("repository {}", self.repo),
                failure,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new(
            "https://api.github.com",
            "token",
            "acme/widgets".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_repo_path_parses() {
        let repo: RepoPath = "acme/widgets".parse().unwrap();
        assert_eq!(repo.owner(), "acme");
        assert_eq!(repo.name(), "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_repo_path_rejects_malformed() {
        assert!("acme".parse::<RepoPath>().is_err());
        assert!("/widgets".parse::<RepoPath>().is_err());
        assert!("acme/".parse::<RepoPath>().is_err());
        assert!("acme/widgets/extra".parse::<RepoPath>().is_err());
        assert!("acme /widgets".parse::<RepoPath>().is_err());
    }

    #[test]
    fn test_url_includes_repo_path() {
        let url = client().url(&["actions", "secrets", "API_KEY"]);
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widgets/actions/secrets/API_KEY"
        );
    }

    #[test]
    fn test_url_escapes_secret_name() {
        let url = client().url(&["actions", "secrets", "odd name"]);
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widgets/actions/secrets/odd%20name"
        );
    }

    #[test]
    fn test_url_tolerates_trailing_slash_in_base() {
        let client = GitHubClient::new(
            "http://127.0.0.1:8080/",
            "token",
            "acme/widgets".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            client.url(&[]).as_str(),
            "http://127.0.0.1:8080/repos/acme/widgets"
        );
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let result = GitHubClient::new("not a url", "token", "acme/widgets".parse().unwrap());
        assert!(matches!(result, Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn test_encrypted_secret_wire_field_names() {
        let secret = EncryptedSecret {
            encrypted_value: "c2VhbGVk".to_string(),
            key_id: "568250167242549743".to_string(),
        };

        let json = serde_json::to_value(&secret).unwrap();
        assert_eq!(json["encrypted_value"], "c2VhbGVk");
        assert_eq!(json["key_id"], "568250167242549743");
    }

    #[test]
    fn test_secret_list_deserializes() {
        let json = r#"{
            "total_count": 2,
            "secrets": [
                {"name": "A", "created_at": "2024-01-02T03:04:05Z", "updated_at": "2024-01-02T03:04:05Z"},
                {"name": "B", "created_at": "2024-02-03T04:05:06Z", "updated_at": "2024-03-04T05:06:07Z"}
            ]
        }"#;

        let list: SecretList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total_count, 2);
        assert_eq!(list.secrets[0].name, "A");
        assert_eq!(list.secrets[1].updated_at.to_rfc3339(), "2024-03-04T05:06:07+00:00");
    }

    #[test]
    fn test_repository_deserializes() {
        let json = r#"{"full_name": "acme/widgets", "private": true, "default_branch": "main"}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "acme/widgets");
        assert!(repo.private);
        assert_eq!(repo.default_branch, "main");
    }
}
