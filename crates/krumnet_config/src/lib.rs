//! Connection configuration for krumnet database tooling.
//!
//! This crate is the single source of truth for obtaining a database
//! connection descriptor. All tooling binaries (migrations, seeds, schema
//! dumps) resolve their connection through [`Resolver`] instead of carrying
//! their own loader.
//!
//! # Usage
//!
//! ```rust,ignore
//! use krumnet_config::{Resolver, ResolverOptions};
//!
//! let resolver = Resolver::new(ResolverOptions::default());
//! let descriptor = resolver.resolve().await?;
//! ```

mod descriptor;
mod env;
mod error;
mod resolver;

pub use descriptor::{ConnectionDescriptor, ConnectionParams};
pub use env::{Env, CONFIG_FILE_VAR, POSTGRES_URI_VAR, TEST_MODE_VAR};
pub use error::{ConfigError, Result};
pub use resolver::{
    Resolution, ResolvedSource, Resolver, ResolverOptions, DEFAULT_CONFIG_PATH, TEST_CONFIG_PATH,
};
