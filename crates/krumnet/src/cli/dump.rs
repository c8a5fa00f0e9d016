//! Schema-only dump of the configured database.
//!
//! Locates `pg_dump` on the system path and redirects its output to a fixed
//! file next to the working directory.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use krumnet_config::ConnectionDescriptor;

/// Where the dump lands.
pub const DUMP_FILE: &str = "dump.sql";

const PG_DUMP: &str = "pg_dump";

#[derive(Error, Debug)]
enum DumpError {
    #[error("could not find a usable `pg_dump` on the system path")]
    ExecutableNotFound,

    #[error("resolved connection has no database to dump")]
    MissingDatabase,

    #[error("failed to spawn pg_dump: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    #[error("pg_dump exited with {status}: {stderr}")]
    Process {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

pub async fn run() -> Result<()> {
    let resolution = super::resolve().await?;
    let pg_dump = find_pg_dump()?;
    let args = dump_args(&resolution.descriptor)?;

    info!(path = %pg_dump.display(), args = ?args, "executing schema-only dump");

    let out_file = std::fs::File::create(DUMP_FILE)
        .with_context(|| format!("failed to create {DUMP_FILE}"))?;

    let output = Command::new(&pg_dump)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(out_file))
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| DumpError::Spawn { source })?;

    if !output.status.success() {
        return Err(DumpError::Process {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        }
        .into());
    }

    println!("wrote schema-only dump to {DUMP_FILE}");
    Ok(())
}

fn find_pg_dump() -> Result<PathBuf, DumpError> {
    let path = which::which(PG_DUMP).map_err(|_| DumpError::ExecutableNotFound)?;
    debug!(path = %path.display(), "found pg_dump");
    Ok(path)
}

/// Argument list for the dump invocation.
///
/// A URI descriptor is passed verbatim as the conninfo target; params
/// contribute `--port` (only when present) and the database name.
fn dump_args(descriptor: &ConnectionDescriptor) -> Result<Vec<String>, DumpError> {
    match descriptor {
        ConnectionDescriptor::Uri(uri) => Ok(vec!["--schema-only".to_owned(), uri.clone()]),
        ConnectionDescriptor::Params(params) => {
            let database = params.database.clone().ok_or(DumpError::MissingDatabase)?;

            let mut args = vec!["--schema-only".to_owned()];
            if let Some(port) = params.port {
                args.push("--port".to_owned());
                args.push(port.to_string());
            }
            args.push(database);
            Ok(args)
        }
    }
}
