//! Unified connection resolution.
//!
//! The dump, migration, and seed tooling historically carried three
//! near-duplicate config loaders with drifting precedence rules. This module
//! replaces them with a single resolver whose precedence is explicit in
//! [`ResolverOptions`].

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::descriptor::ConnectionDescriptor;
use crate::env::{Env, CONFIG_FILE_VAR, POSTGRES_URI_VAR, TEST_MODE_VAR};
use crate::error::{ConfigError, Result};

/// Default on-disk config document.
pub const DEFAULT_CONFIG_PATH: &str = "krumnet-config.json";

/// Config document used when the test-mode flag is set.
pub const TEST_CONFIG_PATH: &str = "krumnet-config.test.json";

/// Key path reported when the nested connection value is absent.
const POSTGRES_URI_KEY: &str = "record_store.postgres_uri";

/// Shape of the on-disk config document.
///
/// Fields are optional so an absent nested key surfaces as
/// [`ConfigError::MissingKey`] rather than a deserialization failure.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    record_store: Option<RecordStoreSection>,
}

#[derive(Debug, Deserialize)]
struct RecordStoreSection {
    postgres_uri: Option<String>,
}

/// Resolution behavior.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// When set, a `KRUMNET_POSTGRES_URI` value wins over the config
    /// document. When unset the document is authoritative and the
    /// environment URI is not consulted.
    pub prefer_env: bool,
    /// Config document used outside test mode.
    pub default_config_path: PathBuf,
    /// Config document used when `KRUMNET_TEST` is set.
    pub test_config_path: PathBuf,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            prefer_env: true,
            default_config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            test_config_path: PathBuf::from(TEST_CONFIG_PATH),
        }
    }
}

/// A resolved descriptor together with the source that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub descriptor: ConnectionDescriptor,
    pub source: ResolvedSource,
}

/// Which source a descriptor came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    /// `KRUMNET_POSTGRES_URI` was set.
    Environment,
    /// Read from the config document at this path.
    File(PathBuf),
}

impl std::fmt::Display for ResolvedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment ({POSTGRES_URI_VAR})"),
            Self::File(path) => write!(f, "config file ({})", path.display()),
        }
    }
}

/// Produces a [`ConnectionDescriptor`] from the environment and the config
/// document. Constructed fresh per invocation; nothing is cached.
#[derive(Debug, Clone)]
pub struct Resolver {
    options: ResolverOptions,
    env: Env,
}

impl Resolver {
    /// A resolver backed by the process environment.
    pub fn new(options: ResolverOptions) -> Self {
        Self::with_env(options, Env::system())
    }

    /// A resolver backed by an explicit environment source.
    pub fn with_env(options: ResolverOptions, env: Env) -> Self {
        Self { options, env }
    }

    /// Resolve a connection descriptor.
    pub async fn resolve(&self) -> Result<ConnectionDescriptor> {
        self.resolve_source().await.map(|r| r.descriptor)
    }

    /// Resolve a connection descriptor and report where it came from.
    pub async fn resolve_source(&self) -> Result<Resolution> {
        if self.options.prefer_env {
            if let Some(resolution) = self.from_env() {
                return Ok(resolution);
            }
        }
        self.from_file().await
    }

    /// The config document path the resolver will read, before any I/O.
    pub fn config_path(&self) -> PathBuf {
        if let Some(path) = self.env.get(CONFIG_FILE_VAR) {
            return PathBuf::from(path);
        }
        if self.env.flag(TEST_MODE_VAR) {
            return self.options.test_config_path.clone();
        }
        self.options.default_config_path.clone()
    }

    fn from_env(&self) -> Option<Resolution> {
        let uri = self.env.get(POSTGRES_URI_VAR).filter(|uri| !uri.is_empty())?;
        debug!(var = POSTGRES_URI_VAR, "using connection uri from environment");
        Some(Resolution {
            descriptor: ConnectionDescriptor::Uri(uri),
            source: ResolvedSource::Environment,
        })
    }

    async fn from_file(&self) -> Result<Resolution> {
        let path = self.config_path();

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::MissingConfigFile(path));
            }
            Err(source) => return Err(ConfigError::UnreadableConfigFile { path, source }),
        };

        let config: ConfigFile = serde_json::from_slice(&bytes)
            .map_err(|source| ConfigError::InvalidJson {
                path: path.clone(),
                source,
            })?;

        let value = config
            .record_store
            .and_then(|section| section.postgres_uri)
            .ok_or(ConfigError::MissingKey(POSTGRES_URI_KEY))?;

        debug!(path = %path.display(), "loaded connection configuration");

        Ok(Resolution {
            descriptor: ConnectionDescriptor::from_config_value(&value)?,
            source: ResolvedSource::File(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ConnectionDescriptor;
    use std::path::Path;

    fn no_env() -> Env {
        Env::from_iter([("", ""); 0])
    }

    fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn file_resolver(path: &Path, env: Env) -> Resolver {
        Resolver::with_env(
            ResolverOptions {
                prefer_env: true,
                default_config_path: path.to_path_buf(),
                test_config_path: path.to_path_buf(),
            },
            env,
        )
    }

    #[tokio::test]
    async fn env_uri_wins_when_preferring_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "krumnet-config.json",
            r#"{"record_store":{"postgres_uri":"postgres://file-host/krumnet"}}"#,
        );

        let env = Env::from_iter([(POSTGRES_URI_VAR, "postgres://env-host/krumnet")]);
        let resolution = file_resolver(&path, env).resolve_source().await.unwrap();

        assert_eq!(resolution.source, ResolvedSource::Environment);
        assert_eq!(
            resolution.descriptor,
            ConnectionDescriptor::Uri("postgres://env-host/krumnet".into())
        );
    }

    #[tokio::test]
    async fn config_file_wins_when_not_preferring_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "krumnet-config.json",
            r#"{"record_store":{"postgres_uri":"postgres://file-host/krumnet"}}"#,
        );

        let env = Env::from_iter([(POSTGRES_URI_VAR, "postgres://env-host/krumnet")]);
        let resolver = Resolver::with_env(
            ResolverOptions {
                prefer_env: false,
                default_config_path: path.clone(),
                test_config_path: path.clone(),
            },
            env,
        );
        let resolution = resolver.resolve_source().await.unwrap();

        assert_eq!(resolution.source, ResolvedSource::File(path));
        assert_eq!(
            resolution.descriptor,
            ConnectionDescriptor::Uri("postgres://file-host/krumnet".into())
        );
    }

    #[tokio::test]
    async fn falls_back_to_file_when_env_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "krumnet-config.json",
            r#"{"record_store":{"postgres_uri":"host=localhost dbname=krumnet"}}"#,
        );

        let descriptor = file_resolver(&path, no_env())
            .resolve()
            .await
            .unwrap();

        match descriptor {
            ConnectionDescriptor::Params(params) => {
                assert_eq!(params.host.as_deref(), Some("localhost"));
                assert_eq!(params.database.as_deref(), Some("krumnet"));
            }
            other => panic!("expected params, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_config_file_is_an_explicit_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let err = file_resolver(&path, no_env())
            .resolve()
            .await
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingConfigFile(p) if p == path));
    }

    #[tokio::test]
    async fn missing_nested_key_is_reported_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "krumnet-config.json", r#"{"record_store":{}}"#);

        let err = file_resolver(&path, no_env())
            .resolve()
            .await
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingKey("record_store.postgres_uri")));
    }

    #[tokio::test]
    async fn invalid_json_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "krumnet-config.json", "not json");

        let err = file_resolver(&path, no_env())
            .resolve()
            .await
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidJson { path: p, .. } if p == path));
    }

    #[test]
    fn config_path_precedence() {
        let options = ResolverOptions::default();

        let resolver = Resolver::with_env(
            options.clone(),
            Env::from_iter([(CONFIG_FILE_VAR, "/etc/krumnet/override.json")]),
        );
        assert_eq!(resolver.config_path(), PathBuf::from("/etc/krumnet/override.json"));

        let resolver = Resolver::with_env(options.clone(), Env::from_iter([(TEST_MODE_VAR, "1")]));
        assert_eq!(resolver.config_path(), PathBuf::from(TEST_CONFIG_PATH));

        let resolver = Resolver::with_env(options, no_env());
        assert_eq!(resolver.config_path(), PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[tokio::test]
    async fn uri_config_value_round_trips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let uri = "postgresql://krumnet@localhost:5432/krumnet?sslmode=disable";
        let path = write_config(
            dir.path(),
            "krumnet-config.json",
            &format!(r#"{{"record_store":{{"postgres_uri":"{uri}"}}}}"#),
        );

        let descriptor = file_resolver(&path, no_env())
            .resolve()
            .await
            .unwrap();

        assert_eq!(descriptor, ConnectionDescriptor::Uri(uri.to_owned()));
    }
}
