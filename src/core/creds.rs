//! AWS shared-credentials profiles.
//!
//! The `cred` operation publishes a key pair straight from the local AWS
//! credentials file, so CI gets exactly the credentials the developer has
//! already configured. The file is the standard INI layout:
//!
//! ```ini
//! [staging]
//! aws_access_key_id = AKIA...
//! aws_secret_access_key = ...
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use crate::core::constants;
use crate::core::values::SecretValue;
use crate::error::ConfigError;

/// One profile's credential pair.
#[derive(Debug)]
pub struct AwsCredentials {
    pub access_key_id: SecretValue,
    pub secret_access_key: SecretValue,
}

/// Locate the shared credentials file.
///
/// Honors `AWS_SHARED_CREDENTIALS_FILE`, falling back to
/// `~/.aws/credentials`.
pub fn credentials_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(constants::AWS_CREDENTIALS_ENV) {
        return Ok(PathBuf::from(path));
    }

    dirs::home_dir()
        .map(|home| home.join(constants::AWS_CREDENTIALS_PATH))
        .ok_or_else(|| ConfigError::CredentialsNotFound("no home directory".to_string()))
}

/// Read one profile's credential pair from the file at `path`.
pub fn read_profile(path: &Path, profile: &str) -> Result<AwsCredentials, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::CredentialsNotFound(
            path.display().to_string(),
        ));
    }

    debug!(path = %path.display(), %profile, "reading credentials file");
    let ini = Ini::load_from_file(path).map_err(|e| ConfigError::CredentialsParse(e.to_string()))?;

    let section = ini
        .section(Some(profile))
        .ok_or_else(|| ConfigError::MissingProfile(profile.to_string()))?;

    let field = |key: &'static str| {
        section
            .get(key)
            .map(SecretValue::from)
            .ok_or(ConfigError::MissingCredential {
                profile: profile.to_string(),
                key,
            })
    };

    Ok(AwsCredentials {
        access_key_id: field("aws_access_key_id")?,
        secret_access_key: field("aws_secret_access_key")?,
    })
}
