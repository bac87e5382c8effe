//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable naming the locations CSV.
pub const LOCATIONS_VAR: &str = "FLIGHT_LOCATIONS_CSV";

/// Environment variable naming the connections CSV.
pub const CONNECTIONS_VAR: &str = "FLIGHT_CONNECTIONS_CSV";

/// Environment variable naming the listen address.
pub const BIND_ADDR_VAR: &str = "FLIGHT_BIND_ADDR";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The bind address is not a socket address
    #[error("invalid {var} {value:?}: {reason}")]
    InvalidBindAddr {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Locations CSV: `code,name,city,region`
    pub airports_path: PathBuf,

    /// Connections CSV: `origin,destination,departure,arrival,duration`
    pub flights_path: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            airports_path: PathBuf::from("airports.csv"),
            flights_path: PathBuf::from("flights.csv"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(LOCATIONS_VAR) {
            config.airports_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(CONNECTIONS_VAR) {
            config.flights_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                    var: BIND_ADDR_VAR,
                    value: addr.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(config)
    }
}
