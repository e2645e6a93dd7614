//! Project configuration file management.
//!
//! Handles reading and validating the optional `.capstan.toml` file, which
//! carries project defaults so CI invocations stay short:
//!
//! ```toml
//! [capstan]
//! repo = "acme/widgets"
//! config_path = "config"
//! config_file_pattern = "secrets.{stage}.yml"
//! prefix_with_stage = true
//! prefix_separator = "-"
//!
//! [stages]
//! main = "prod"
//! develop = "dev"
//! ```
//!
//! Flags always win over the file; the file wins over derived defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::Result;

/// Project defaults stored in `.capstan.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// The `[capstan]` section.
    #[serde(default)]
    pub capstan: Meta,

    /// Branch name to stage name mapping, consulted when `--stage` is not
    /// given.
    #[serde(default)]
    pub stages: BTreeMap<String, String>,
}

/// The `[capstan]` section.
#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    /// Repository path as "owner/repo".
    pub repo: Option<String>,
    /// Directory holding the stage config files.
    pub config_path: Option<PathBuf>,
    /// Config file name pattern; `{stage}` is replaced by the stage.
    pub config_file_pattern: Option<String>,
    /// Prefix secret names with `{stage}{separator}`.
    pub prefix_with_stage: Option<bool>,
    /// Separator between the stage prefix and the secret name.
    pub prefix_separator: Option<String>,
}

impl ProjectConfig {
    /// Path to the configuration file in the current directory.
    pub fn path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load `.capstan.toml`, or defaults when the file is absent.
    ///
    /// The file is optional; a missing file is not an error, a malformed
    /// one is.
    pub fn load() -> Result<Self> {
        let path = Self::path();
        if !path.exists() {
            debug!("no project config file");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading project config");
        let contents = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&contents)?;

        debug!(stages = config.stages.len(), "project config loaded");
        Ok(config)
    }

    /// The stage mapped to `branch`, if any.
    pub fn stage_for(&self, branch: &str) -> Option<&str> {
        self.stages.get(branch).map(String::as_str)
    }
}
