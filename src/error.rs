//! Error types for capstan.
//!
//! Remote failures are split by operation kind so callers (and the batch
//! reporter) can tell a failed key fetch from a failed write, and recover
//! the HTTP status the platform responded with when there was one.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("{failed} of {total} secrets failed to publish")]
    PartialFailure { failed: usize, total: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// How a single remote call failed: the platform answered with a non-2xx
/// status, or the request never completed.
#[derive(Error, Debug)]
pub enum CallFailure {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CallFailure {
    /// The HTTP status code, when the remote actually responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            CallFailure::Status(code) => Some(*code),
            CallFailure::Transport(_) => None,
        }
    }
}

/// A remote API operation failed.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("could not fetch {what}: {failure}")]
    Fetch { what: String, failure: CallFailure },

    #[error("could not write secret {name}: {failure}")]
    Write { name: String, failure: CallFailure },

    #[error("could not delete secret {name}: {failure}")]
    Delete { name: String, failure: CallFailure },
}

impl RemoteError {
    /// The HTTP status carried by the underlying failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Fetch { failure, .. }
            | RemoteError::Write { failure, .. }
            | RemoteError::Delete { failure, .. } => failure.status(),
        }
    }
}

/// Missing or malformed collaborator-supplied settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no token given")]
    MissingToken,

    #[error("no repository given and none could be derived from git")]
    MissingRepo,

    #[error("no stage given and branch {branch:?} has no [stages] mapping")]
    MissingStage { branch: String },

    #[error("invalid repository path {0:?}: expected owner/repo")]
    InvalidRepoPath(String),

    #[error("invalid API base URL: {0}")]
    InvalidApiUrl(String),

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),

    #[error("config file not found: {0}")]
    ConfigFileNotFound(String),

    #[error("could not use config file {path}: {reason}")]
    InvalidConfigDocument { path: String, reason: String },

    #[error("secret {key:?} has an unsupported value ({kind}); only scalars can be published")]
    UnsupportedValue { key: String, kind: &'static str },

    #[error("credentials file not found: {0}")]
    CredentialsNotFound(String),

    #[error("could not parse credentials file: {0}")]
    CredentialsParse(String),

    #[error("profile {0:?} not found in credentials file")]
    MissingProfile(String),

    #[error("profile {profile:?} has no {key}")]
    MissingCredential {
        profile: String,
        key: &'static str,
    },

    #[error("git: {0}")]
    Git(String),
}

/// Sealing a value against the repository public key failed.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("public key is not valid base64")]
    InvalidBase64,

    #[error("public key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("sealed box encryption failed")]
    SealFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
