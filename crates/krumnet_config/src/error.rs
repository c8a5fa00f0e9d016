//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration resolution result type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
///
/// A missing config document is its own variant rather than an empty
/// document: the two are semantically different and downstream tooling
/// needs to tell a misplaced file apart from a misconfigured one.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config document does not exist at the selected path.
    #[error("config file not found: {}", .0.display())]
    MissingConfigFile(PathBuf),

    /// The config document exists but could not be read.
    #[error("config file {} could not be read: {source}", path.display())]
    UnreadableConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config document is not valid JSON.
    #[error("config file {} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config document parsed but the nested connection key is absent.
    #[error("config file is missing `{0}`")]
    MissingKey(&'static str),

    /// A `port` field in a key=value connection string did not parse.
    #[error("invalid port in connection string: {0:?}")]
    InvalidPort(String),
}
