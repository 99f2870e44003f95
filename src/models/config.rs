//! Configuration module for Wallet Sentinel
//!
//! Defaults come from utils/constants.rs; only the RPC endpoint and the
//! API listener can be overridden from the environment.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    BASE_MAINNET_RPC_URL, COMPROMISE_CACHE_TTL_SECS, DEFAULT_RPC_TIMEOUT_SECS,
    REPUTATION_CACHE_TTL_SECS, RPC_URL_ENV,
};

/// Engine configuration shared by the scorer and the analyzer
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// HTTP JSON-RPC endpoint of the chain data source
    pub rpc_url: String,
    /// Timeout for a single RPC call
    pub rpc_timeout: Duration,
    /// Freshness window of reputation results
    pub reputation_ttl: Duration,
    /// Freshness window of compromise results
    pub compromise_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rpc_url: BASE_MAINNET_RPC_URL.to_string(),
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
            reputation_ttl: Duration::from_secs(REPUTATION_CACHE_TTL_SECS),
            compromise_ttl: Duration::from_secs(COMPROMISE_CACHE_TTL_SECS),
        }
    }
}

impl EngineConfig {
    /// Defaults, with the RPC endpoint taken from `BASE_HTTP_URL` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            if !url.trim().is_empty() {
                info!("🔧 Using RPC endpoint from {}", RPC_URL_ENV);
                config.rpc_url = url.trim().to_string();
            }
        }
        config
    }
}

/// Listener configuration for the API binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Read `WALLET_HOST` and `PORT` (falling back to `WALLET_PORT`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("WALLET_HOST").unwrap_or(defaults.host);
        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("WALLET_PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| AppError::invalid_config(format!("Invalid listen address {}:{}", self.host, self.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.rpc_url, "https://mainnet.base.org");
        assert_eq!(config.reputation_ttl, Duration::from_secs(900));
        assert_eq!(config.compromise_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn test_rpc_url_override_from_env() {
        // only test touching this variable
        std::env::set_var(RPC_URL_ENV, "  http://127.0.0.1:8545  ");
        assert_eq!(EngineConfig::from_env().rpc_url, "http://127.0.0.1:8545");

        std::env::set_var(RPC_URL_ENV, "   ");
        assert_eq!(EngineConfig::from_env().rpc_url, BASE_MAINNET_RPC_URL);

        std::env::remove_var(RPC_URL_ENV);
        assert_eq!(EngineConfig::from_env().rpc_url, BASE_MAINNET_RPC_URL);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig { host: "127.0.0.1".to_string(), port: 3000 };
        assert_eq!(config.socket_addr().unwrap().port(), 3000);

        let bad = ServerConfig { host: "not a host".to_string(), port: 3000 };
        assert!(bad.socket_addr().is_err());
    }
}
