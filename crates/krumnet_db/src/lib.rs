//! PostgreSQL record store and schema tooling for krumnet.
//!
//! This crate owns the connection pool, the embedded migration set, and the
//! data seeds. The CLI drives all database work through it; nothing else in
//! the workspace talks to PostgreSQL directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use krumnet_config::{Resolver, ResolverOptions};
//! use krumnet_db::RecordStore;
//!
//! let descriptor = Resolver::new(ResolverOptions::default()).resolve().await?;
//! let store = RecordStore::open(&descriptor).await?;
//! krumnet_db::run_migrations(store.pool()).await?;
//! ```

mod error;
mod migrate;
mod seed;
mod store;

pub use error::{DbError, Result};
pub use migrate::{migration_status, revert_last, run_migrations, MigrationStatus, MIGRATOR};
pub use seed::{seed_initial_prompts, SEED_SOURCE};
pub use store::RecordStore;
