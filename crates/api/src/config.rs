//! Runtime configuration read from the environment.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const BIND_ADDR_ENV: &str = "ORDERFLOW_BIND_ADDR";
pub const SEED_PATH_ENV: &str = "ORDERFLOW_SEED_PATH";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a socket address, got '{value}': {source}")]
    InvalidBindAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// JSON seed file loaded into the in-memory repository at start-up.
    pub seed_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let raw_addr = read(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_ENV,
                value: raw_addr.clone(),
                source,
            })?;

        Ok(Self {
            bind_addr,
            seed_path: read(SEED_PATH_ENV).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.seed_path, None);
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_ENV, " 127.0.0.1:9000 "),
            (SEED_PATH_ENV, "/etc/orderflow/seed.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.seed_path, Some(PathBuf::from("/etc/orderflow/seed.json")));
    }

    #[test]
    fn blank_seed_path_is_ignored() {
        let config = ApiConfig::from_lookup(lookup(&[(SEED_PATH_ENV, "   ")])).unwrap();
        assert_eq!(config.seed_path, None);
    }

    #[test]
    fn malformed_bind_addr_is_an_error() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_ENV, "localhost")])).unwrap_err();
        match err {
            ConfigError::InvalidBindAddr { var, value, .. } => {
                assert_eq!(var, BIND_ADDR_ENV);
                assert_eq!(value, "localhost");
            }
        }
    }
}
