//! Environment access for the resolver.
//!
//! The resolver never reads `std::env` directly; it goes through [`Env`] so
//! tests can supply their own variables without mutating process state.

use std::collections::HashMap;

/// Environment variable holding a full connection URI.
pub const POSTGRES_URI_VAR: &str = "KRUMNET_POSTGRES_URI";

/// Environment variable overriding the config document path.
pub const CONFIG_FILE_VAR: &str = "KRUMNET_CONFIG_FILE";

/// Environment flag selecting the test config document.
pub const TEST_MODE_VAR: &str = "KRUMNET_TEST";

/// An environment variable source.
///
/// Defaults to the process environment; tests build one from a fixed set of
/// variables with [`Env::from_iter`].
#[derive(Debug, Clone, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// The process environment.
    pub fn system() -> Self {
        Self { overrides: None }
    }

    /// A fixed environment backed by the given variables only.
    pub fn from_iter<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<String> {
        match &self.overrides {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
    }

    /// Interpret a variable as a boolean flag.
    ///
    /// Unset, empty, `0`, and `false` all read as off.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|value| !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
    }
}
