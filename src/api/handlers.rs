//! API Request Handlers

use axum::{
    extract::{rejection::QueryRejection, Json, Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::types::*;
use crate::core::engine::WalletEngine;
use crate::models::errors::AppError;
use crate::models::types::{CompromiseResult, ReputationResult};
use crate::utils::constants::{APP_VERSION, CACHE_CLEANUP_INTERVAL_SECS, CHAIN_ID_BASE};

type ErrorReply = (StatusCode, Json<ApiResponse<()>>);

/// Shared application state
pub struct AppState {
    pub engine: WalletEngine,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: WalletEngine) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
        }
    }

    /// Background task: sweep expired cache entries periodically
    pub fn spawn_cache_cleanup(&self) {
        let engine = self.engine.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(CACHE_CLEANUP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                let removed = engine.cleanup_expired();
                if removed > 0 {
                    info!("🧹 Cache cleanup: {} expired entries removed", removed);
                }
            }
        });
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn error_reply(err: &AppError, start: Instant) -> ErrorReply {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::error(ApiError::from(err), elapsed_ms(start))))
}

/// `?refresh=` flag, or a 400 when the query string does not parse
fn refresh_flag(
    query: Result<Query<WalletQuery>, QueryRejection>,
    start: Instant,
) -> Result<bool, ErrorReply> {
    match query {
        Ok(Query(query)) => Ok(query.refresh),
        Err(rejection) => {
            let err = AppError::bad_request(rejection.body_text());
            warn!(code = err.code_str(), "Rejected query string");
            Err(error_reply(&err, start))
        }
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        chain_id: CHAIN_ID_BASE,
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        reputation_cache: state.engine.reputation.cache().stats(),
        compromise_cache: state.engine.compromise.cache().stats(),
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Wallet Reputation
// ============================================

pub async fn get_reputation(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    query: Result<Query<WalletQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ReputationResult>>, ErrorReply> {
    let start = Instant::now();
    let refresh = refresh_flag(query, start)?;
    let address = address.trim();

    match state.engine.reputation.calculate(address, refresh).await {
        Ok(result) => Ok(Json(ApiResponse::success(result, elapsed_ms(start)))),
        Err(e) => {
            warn!(address = %address, code = e.code_str(), "Reputation request failed");
            Err(error_reply(&e, start))
        }
    }
}

// ============================================
// Compromise Analysis
// ============================================

pub async fn get_compromise(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    query: Result<Query<WalletQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CompromiseResult>>, ErrorReply> {
    let start = Instant::now();
    let refresh = refresh_flag(query, start)?;
    let address = address.trim();

    match state.engine.compromise.analyze(address, refresh).await {
        Ok(result) => Ok(Json(ApiResponse::success(result, elapsed_ms(start)))),
        Err(e) => {
            warn!(address = %address, code = e.code_str(), "Compromise request failed");
            Err(error_reply(&e, start))
        }
    }
}
