//! RPC Client Module - Base mainnet JSON-RPC
//!
//! Plain HTTP JSON-RPC against a single fixed endpoint:
//! 1. Custom User-Agent header
//! 2. Gzip compression on responses
//! 3. One attempt per call; retries are the caller's decision
//! 4. Hex quantity decoding for `eth_getTransactionCount` / `eth_getBalance`

use alloy_primitives::U256;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::config::EngineConfig;
use crate::models::errors::{AppError, AppResult};
use crate::providers::source::ChainDataSource;
use crate::utils::constants::USER_AGENT as USER_AGENT_CONST;

/// JSON-RPC provider for a single endpoint
#[derive(Clone)]
pub struct RpcProvider {
    url: String,
    /// HTTP client with custom headers (gzip enabled)
    client: reqwest::Client,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            url: url.into(),
            client: Self::build_client(timeout)?,
        })
    }

    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        Self::new(config.rpc_url.clone(), config.rpc_timeout)
    }

    /// Build HTTP client with custom headers
    fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))
    }

    /// Execute a single JSON-RPC call
    pub async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> AppResult<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!("📡 RPC {} -> {}", method, self.masked_url());

        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if status == 429 {
            return Err(AppError::rpc_rate_limited());
        }
        if !status.is_success() {
            return Err(AppError::rpc_error(format!("HTTP error: {}", status)));
        }

        let json: RpcResponse<T> = response.json().await?;

        if let Some(error) = json.error {
            if error.is_rate_limit() {
                return Err(AppError::rpc_rate_limited());
            }
            return Err(AppError::rpc_error(format!(
                "RPC error: {} (code: {})",
                error.message, error.code
            )));
        }

        json.result
            .ok_or_else(|| AppError::invalid_response(format!("No result in {} response", method)))
    }

    /// Get RPC URL with any path-embedded API key hidden
    pub fn masked_url(&self) -> String {
        if let Some((base, _key)) = self.url.split_once("/v2/") {
            return format!("{}/v2/***HIDDEN***", base);
        }
        self.url.clone()
    }
}

#[async_trait]
impl ChainDataSource for RpcProvider {
    async fn get_transaction_count(&self, address: &str) -> AppResult<u64> {
        let params = serde_json::json!([address, "latest"]);
        let raw: String = self.call("eth_getTransactionCount", params).await?;
        parse_quantity_u64(&raw)
    }

    async fn get_balance(&self, address: &str) -> AppResult<U256> {
        let params = serde_json::json!([address, "latest"]);
        let raw: String = self.call("eth_getBalance", params).await?;
        parse_quantity_u256(&raw)
    }
}

fn quantity_body(raw: &str) -> AppResult<&str> {
    match raw.strip_prefix("0x") {
        Some(body) if !body.is_empty() => Ok(body),
        _ => Err(AppError::invalid_response(format!("Invalid hex quantity: {}", raw))),
    }
}

/// Decode a JSON-RPC hex quantity ("0x1a") into u64
pub fn parse_quantity_u64(raw: &str) -> AppResult<u64> {
    let body = quantity_body(raw)?;
    u64::from_str_radix(body, 16)
        .map_err(|e| AppError::invalid_response(format!("Invalid quantity {}: {}", raw, e)))
}

/// Decode a JSON-RPC hex quantity into U256
pub fn parse_quantity_u256(raw: &str) -> AppResult<U256> {
    let body = quantity_body(raw)?;
    U256::from_str_radix(body, 16)
        .map_err(|e| AppError::invalid_response(format!("Invalid quantity {}: {}", raw, e)))
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<T>,
    error: Option<RpcError>,
    #[allow(dead_code)]
    id: u64,
}

/// JSON-RPC error structure
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    /// Rate limit error (HTTP 429 equivalent or code -32005)
    pub fn is_rate_limit(&self) -> bool {
        self.code == -32005 || self.message.to_lowercase().contains("rate limit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_parse_quantity_u64() {
        assert_eq!(parse_quantity_u64("0x0").unwrap(), 0);
        assert_eq!(parse_quantity_u64("0x190").unwrap(), 400);
        assert_eq!(parse_quantity_u64("0xFF").unwrap(), 255);
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        assert_eq!(parse_quantity_u64("0x").unwrap_err().code, ErrorCode::RpcInvalidResponse);
        assert_eq!(parse_quantity_u64("12").unwrap_err().code, ErrorCode::RpcInvalidResponse);
        assert_eq!(parse_quantity_u64("0xzz").unwrap_err().code, ErrorCode::RpcInvalidResponse);
    }

    #[test]
    fn test_parse_quantity_u256() {
        // 1 ETH in wei
        let one_eth = parse_quantity_u256("0xde0b6b3a7640000").unwrap();
        assert_eq!(one_eth, U256::from(1_000_000_000_000_000_000u128));
        assert!(parse_quantity_u256("0x0").unwrap().is_zero());
    }

    #[test]
    fn test_masked_url() {
        let provider = RpcProvider::new(
            "https://base-mainnet.g.alchemy.com/v2/secret",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(provider.masked_url(), "https://base-mainnet.g.alchemy.com/v2/***HIDDEN***");

        let public = RpcProvider::new("https://mainnet.base.org", Duration::from_secs(5)).unwrap();
        assert_eq!(public.masked_url(), "https://mainnet.base.org");
    }

    #[test]
    fn test_rpc_error_classification() {
        let rate_limit_error = RpcError {
            code: -32005,
            message: "Rate limit exceeded".to_string(),
        };
        assert!(rate_limit_error.is_rate_limit());

        let other = RpcError {
            code: -32000,
            message: "header not found".to_string(),
        };
        assert!(!other.is_rate_limit());
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_connection_failed() {
        // bind then drop to get a local port nobody listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let provider =
            RpcProvider::new(format!("http://127.0.0.1:{}", port), Duration::from_secs(2)).unwrap();

        let err = provider
            .get_transaction_count("0xdAC17F958D2ee523a2206206994597C13D831ec7")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RpcConnectionFailed);
        assert!(err.code.is_retryable());
    }
}
