//! Capstan - winch your deployment secrets up to GitHub Actions.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── write         # Publish a stage's config document
//! │   ├── cred          # Publish AWS credentials from a profile
//! │   ├── secrets       # list / get / delete
//! │   ├── connect       # Connectivity and auth check
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── github        # Authenticated GitHub API client
//!     ├── keys          # Repository public-key cache (single fetch per run)
//!     ├── seal          # Sealed-box encryption
//!     ├── publish       # Naming transform + publish pipeline
//!     ├── values        # Plaintext secret values
//!     ├── config        # .capstan.toml project settings
//!     ├── gitinfo       # Branch and origin-remote defaults
//!     └── creds         # AWS shared-credentials profiles
//! ```
//!
//! # Features
//!
//! - Sealed-box encryption against the repository's Actions public key
//! - One key fetch per run, shared by concurrent publishes
//! - Stage-based secret name prefixing for environment isolation
//! - Batch publishing with per-secret outcome reporting

pub mod cli;
pub mod core;
pub mod error;
