//! Configuration Module
//!
//! Loads server configuration from a YAML file, or from a remote URL at
//! startup. The resulting `Config` is immutable for the process
//! lifetime; there is no hot reload.

use std::collections::BTreeMap;
use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::sieve::SieveFilter;

/// Default config file consulted when no explicit source is set.
const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Server configuration parameters.
///
/// Every field has a sensible default, so an empty YAML document (or a
/// missing default config file) yields a working server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hard ceiling on any requested upper bound
    pub max_bound: u64,
    /// Idle seconds before a cached domain entry is evicted
    pub cache_ttl_seconds: u64,
    /// Maximum number of concurrently cached domain entries
    pub cache_max_entries: usize,
    /// Listener bind address
    pub listen_host: String,
    /// Listener port
    pub listen_port: u16,
    /// Per-request cap on awaiting a prefix extension, in seconds
    pub compute_timeout_seconds: u64,
    /// Background eviction scan interval in seconds
    pub cleanup_interval_seconds: u64,
    /// Optional URL receiving a one-shot status POST after startup
    pub report_url: Option<String>,
    /// Named sieve domains exposed by the listener
    pub domains: BTreeMap<String, SieveFilter>,
}

impl Default for Config {
    fn default() -> Self {
        let mut domains = BTreeMap::new();
        domains.insert("primes".to_string(), SieveFilter::Primes);
        Self {
            max_bound: 10_000_000,
            cache_ttl_seconds: 3600,
            cache_max_entries: 64,
            listen_host: "0.0.0.0".to_string(),
            listen_port: 8000,
            compute_timeout_seconds: 30,
            cleanup_interval_seconds: 5,
            report_url: None,
            domains,
        }
    }
}

impl Config {
    /// Resolves and loads the configuration.
    ///
    /// Source precedence:
    /// 1. `SIEVED_CONFIG_URL` — fetched over HTTP
    /// 2. `SIEVED_CONFIG` — explicit file path
    /// 3. `./config.yml` — if present
    /// 4. built-in defaults
    ///
    /// Any error here is fatal; the caller exits non-zero.
    pub async fn load() -> std::result::Result<Self, ConfigError> {
        let config = if let Ok(url) = env::var("SIEVED_CONFIG_URL") {
            Self::fetch(&url).await?
        } else if let Ok(path) = env::var("SIEVED_CONFIG") {
            Self::from_file(&path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses a config from a YAML file on disk.
    pub fn from_file(path: &str) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Parses a config from a YAML document.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Fetches a YAML config document over HTTP.
    async fn fetch(url: &str) -> std::result::Result<Self, ConfigError> {
        let fetch_err = |source| ConfigError::Fetch {
            url: url.to_string(),
            source,
        };
        let text = reqwest::get(url)
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?
            .text()
            .await
            .map_err(fetch_err)?;
        Self::from_yaml(&text)
    }

    /// Checks internal consistency. Called once at load time.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_bound == 0 {
            return Err(ConfigError::Invalid("max_bound must be positive".into()));
        }
        if self.cache_max_entries == 0 {
            return Err(ConfigError::Invalid(
                "cache_max_entries must be positive".into(),
            ));
        }
        if self.compute_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "compute_timeout_seconds must be positive".into(),
            ));
        }
        if self.listen_host.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "listen_host '{}' is not an IP address",
                self.listen_host
            )));
        }
        if self.domains.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one domain must be configured".into(),
            ));
        }
        for (name, filter) in &self.domains {
            if let SieveFilter::Multiples { bases } = filter {
                if bases.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "domain '{}': multiples filter needs at least one base",
                        name
                    )));
                }
                if bases.iter().any(|&b| b < 2) {
                    return Err(ConfigError::Invalid(format!(
                        "domain '{}': bases must be >= 2",
                        name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Socket address the listener binds to.
    pub fn listen_addr(&self) -> std::result::Result<SocketAddr, ConfigError> {
        let host = self
            .listen_host
            .parse::<std::net::IpAddr>()
            .map_err(|_| {
                ConfigError::Invalid(format!(
                    "listen_host '{}' is not an IP address",
                    self.listen_host
                ))
            })?;
        Ok(SocketAddr::new(host, self.listen_port))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn compute_timeout(&self) -> Duration {
        Duration::from_secs(self.compute_timeout_seconds)
    }
}
