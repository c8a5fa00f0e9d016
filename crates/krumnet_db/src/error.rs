//! Error types for the database layer.

use thiserror::Error;

/// Database operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// Underlying sqlx failure (connecting, querying)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A migration failed to apply or revert
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The connection configuration could not be resolved
    #[error("configuration error: {0}")]
    Config(#[from] krumnet_config::ConfigError),

    /// Revert requested against a database with nothing applied
    #[error("no applied migrations to revert")]
    NothingToRevert,
}
