//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "krumnet=info,krumnet_db=info,krumnet_config=info";
const VERBOSE_LOG_FILTER: &str = "krumnet=debug,krumnet_db=debug,krumnet_config=debug";

/// Initialize tracing with stderr output.
///
/// `RUST_LOG` overrides the default filter; `--verbose` raises everything
/// to debug regardless.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
