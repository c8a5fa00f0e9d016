//! CLI commands for the krumnet database tooling.

pub mod config;
pub mod dump;
pub mod migrate;
pub mod seed;

use anyhow::Result;
use krumnet_config::{Resolution, Resolver, ResolverOptions};

/// Resolve the connection configuration for a command invocation.
///
/// Every command resolves fresh; nothing is cached between invocations.
pub async fn resolve() -> Result<Resolution> {
    let resolver = Resolver::new(ResolverOptions::default());
    Ok(resolver.resolve_source().await?)
}
