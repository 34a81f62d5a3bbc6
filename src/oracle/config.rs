//! Configuration for reaching the oracle process.

use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use super::transport::{self, DEFAULT_TIMEOUT, TransportError};

/// Where the oracle listens and how long to wait for its replies.
///
/// Set once before the simulation starts and read-only thereafter; call
/// sites receive an injected [`OracleClient`](super::OracleClient) built
/// from this struct rather than consulting process-wide state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OracleConfig {
    /// Oracle host, dotted IP or hostname
    pub server_ip: String,
    /// Oracle UDP port
    pub server_port: u16,
    /// Bounded wait for each reply, in seconds
    pub timeout_secs: f64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            server_ip: "127.0.0.1".to_string(),
            server_port: 8103,
            timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
        }
    }
}

impl OracleConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults, so a file may override
    /// just the server address.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;

        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", config_path.display()))
    }

    /// Resolve the configured host/port to a socket address.
    pub fn server_addr(&self) -> Result<SocketAddr, TransportError> {
        transport::resolve(&self.server_ip, self.server_port)
    }

    /// The reply timeout as a `Duration`. Non-positive or non-finite values
    /// collapse to zero, which makes every exchange fail immediately with a
    /// timeout instead of blocking forever.
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs.is_finite() && self.timeout_secs > 0.0 {
            Duration::from_secs_f64(self.timeout_secs)
        } else {
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_oracle() {
        let config = OracleConfig::default();
        assert_eq!(config.server_ip, "127.0.0.1");
        assert_eq!(config.server_port, 8103);
        assert_eq!(config.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: OracleConfig = toml::from_str("server-port = 9000").unwrap();
        assert_eq!(config.server_ip, "127.0.0.1");
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.timeout_secs, 2.0);
    }

    #[test]
    fn full_toml_parses_kebab_case_keys() {
        let config: OracleConfig = toml::from_str(
            "server-ip = \"10.0.0.7\"\nserver-port = 8200\ntimeout-secs = 0.5",
        )
        .unwrap();
        assert_eq!(config.server_ip, "10.0.0.7");
        assert_eq!(config.server_port, 8200);
        assert_eq!(config.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn degenerate_timeouts_collapse_to_zero() {
        let mut config = OracleConfig::default();
        config.timeout_secs = -1.0;
        assert_eq!(config.timeout(), Duration::ZERO);
        config.timeout_secs = f64::NAN;
        assert_eq!(config.timeout(), Duration::ZERO);
    }
}
