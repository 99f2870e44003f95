//! HTTP API tests for Wallet Sentinel
//!
//! Drives the full router (middleware included) with `oneshot` requests
//! over an in-memory chain data source.

use alloy_primitives::U256;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use wallet_sentinel::api::{create_router, handlers::AppState};
use wallet_sentinel::models::errors::{ANALYSIS_FAILED_MESSAGE, FETCH_FAILED_MESSAGE};
use wallet_sentinel::{
    AppError, AppResult, ChainDataSource, EngineConfig, ManualClock, WalletEngine,
};

const WHALE: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

struct MockChain {
    tx_count: AtomicU64,
    fail: AtomicBool,
    tx_calls: AtomicUsize,
}

impl MockChain {
    fn new(tx_count: u64) -> Arc<Self> {
        Arc::new(Self {
            tx_count: AtomicU64::new(tx_count),
            fail: AtomicBool::new(false),
            tx_calls: AtomicUsize::new(0),
        })
    }

    fn tx_calls(&self) -> usize {
        self.tx_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainDataSource for MockChain {
    async fn get_transaction_count(&self, _address: &str) -> AppResult<u64> {
        self.tx_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::rpc_error("HTTP error: 503 Service Unavailable"));
        }
        Ok(self.tx_count.load(Ordering::SeqCst))
    }

    async fn get_balance(&self, _address: &str) -> AppResult<U256> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::rpc_error("HTTP error: 503 Service Unavailable"));
        }
        Ok(U256::ZERO)
    }
}

fn app_with(chain: Arc<MockChain>) -> Router {
    let clock = Arc::new(ManualClock::starting_now());
    let engine = WalletEngine::new(chain, clock, &EngineConfig::default());
    create_router(Arc::new(AppState::new(engine)))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_chain() {
    let app = app_with(MockChain::new(0));

    for uri in ["/health", "/v1/health"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["chain_id"], 8453);
    }
}

#[tokio::test]
async fn test_path_address_is_trimmed() {
    let chain = MockChain::new(150);
    let app = app_with(chain.clone());

    let (status, body) = get_json(&app, &format!("/v1/reputation/%20{}%20", WHALE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["address"], WHALE);
    assert_eq!(body["data"]["finalScore"], 69);
    assert_eq!(chain.tx_calls(), 1);
}

#[tokio::test]
async fn test_invalid_address_is_bad_request() {
    let chain = MockChain::new(150);
    let app = app_with(chain.clone());

    for uri in ["/v1/reputation/0x123", "/v1/compromise/0x123"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "ADDRESS_INVALID");
        assert!(body.get("data").is_none());
    }
    assert_eq!(chain.tx_calls(), 0);
}

#[tokio::test]
async fn test_fetch_failure_is_bad_gateway() {
    let chain = MockChain::new(150);
    chain.fail.store(true, Ordering::SeqCst);
    let app = app_with(chain);

    let (status, body) = get_json(&app, &format!("/v1/reputation/{}", WHALE)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "WALLET_FETCH_FAILED");
    assert_eq!(body["error"]["message"], FETCH_FAILED_MESSAGE);

    let (status, body) = get_json(&app, &format!("/v1/compromise/{}", WHALE)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "WALLET_ANALYSIS_FAILED");
    assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_refresh_query_bypasses_cache() {
    let chain = MockChain::new(3);
    let app = app_with(chain.clone());
    let uri = format!("/v1/reputation/{}", WHALE);

    let (_, first) = get_json(&app, &uri).await;
    chain.tx_count.store(400, Ordering::SeqCst);

    let (_, cached) = get_json(&app, &uri).await;
    assert_eq!(cached["data"]["finalScore"], first["data"]["finalScore"]);
    assert_eq!(chain.tx_calls(), 1);

    let (status, refreshed) = get_json(&app, &format!("{}?refresh=true", uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["data"]["finalScore"], 85);
    assert_eq!(chain.tx_calls(), 2);

    // the refreshed result replaced the cached one
    let (_, after) = get_json(&app, &uri).await;
    assert_eq!(after["data"]["finalScore"], 85);
    assert_eq!(chain.tx_calls(), 2);
}

#[tokio::test]
async fn test_malformed_query_is_rejected() {
    let chain = MockChain::new(3);
    let app = app_with(chain.clone());

    let (status, body) = get_json(&app, &format!("/v1/compromise/{}?refresh=maybe", WHALE)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
    assert_eq!(chain.tx_calls(), 0);
}

#[tokio::test]
async fn test_stats_shape() {
    let app = app_with(MockChain::new(40));
    let uri = format!("/v1/reputation/{}", WHALE);
    get_json(&app, &uri).await;
    get_json(&app, &uri).await;

    let (status, body) = get_json(&app, "/v1/stats").await;
    assert_eq!(status, StatusCode::OK);

    let reputation = &body["data"]["reputation_cache"];
    assert_eq!(reputation["entries"], 1);
    assert_eq!(reputation["hits"], 1);
    assert_eq!(reputation["misses"], 1);
    assert_eq!(reputation["ttl_secs"], 900);

    let compromise = &body["data"]["compromise_cache"];
    assert_eq!(compromise["entries"], 0);
    assert_eq!(compromise["ttl_secs"], 1800);
    assert!(body["data"]["api_version"].is_string());
}
