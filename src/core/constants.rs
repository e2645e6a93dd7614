//! Constants used throughout capstan.
//!
//! Centralizes magic strings and configuration values.

/// Project configuration file name (.capstan.toml).
pub const CONFIG_FILE: &str = ".capstan.toml";

/// Default GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "CAPSTAN_API_URL";

/// Environment variable overriding the AWS shared credentials file path.
pub const AWS_CREDENTIALS_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// AWS shared credentials file location relative to HOME.
pub const AWS_CREDENTIALS_PATH: &str = ".aws/credentials";

/// Default config file pattern; `{stage}` is replaced by the stage name.
pub const DEFAULT_CONFIG_FILE_PATTERN: &str = "secrets.{stage}.yml";

/// Default separator between a stage prefix and the secret name.
pub const DEFAULT_PREFIX_SEPARATOR: &str = "-";

/// Bound on every remote request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
