//! Connection pool construction from a resolved descriptor.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{info, warn};

use krumnet_config::ConnectionDescriptor;

use crate::error::Result;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(1);

/// A pooled PostgreSQL connection for the krumnet schema tooling.
pub struct RecordStore {
    pool: PgPool,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "RecordStore")
    }
}

impl RecordStore {
    /// Open a connection pool for the given descriptor.
    pub async fn open(descriptor: &ConnectionDescriptor) -> Result<Self> {
        let options = connect_options(descriptor)?;

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        info!("connection pool successfully created, ready to execute queries");

        Ok(Self { pool })
    }

    /// The underlying pool, for the migration and seed operations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for in-flight connections to finish.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Translate a descriptor into sqlx connect options.
///
/// URIs are handed to sqlx unparsed; params are applied field-by-field.
/// Unknown passthrough keys have no pool equivalent and are skipped.
pub(crate) fn connect_options(descriptor: &ConnectionDescriptor) -> Result<PgConnectOptions> {
    match descriptor {
        ConnectionDescriptor::Uri(uri) => Ok(uri.parse()?),
        ConnectionDescriptor::Params(params) => {
            let mut options = PgConnectOptions::new();
            if let Some(host) = &params.host {
                options = options.host(host);
            }
            if let Some(port) = params.port {
                options = options.port(port);
            }
            if let Some(database) = &params.database {
                options = options.database(database);
            }
            if let Some(user) = &params.user {
                options = options.username(user);
            }
            if let Some(password) = &params.password {
                options = options.password(password);
            }
            if !params.extra.is_empty() {
                let keys = params.extra.keys().cloned().collect::<Vec<_>>().join(", ");
                warn!(keys = %keys, "connection string keys with no pool equivalent, skipping");
            }
            Ok(options)
        }
    }
}
