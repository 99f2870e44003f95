//! Wallet Sentinel Library
//!
//! Wallet risk scoring for Base mainnet addresses. Two independent analyzers
//! read the transaction count and balance of an address and produce:
//! - a 0-100 reputation score with flags, badges and a trust tier
//! - a 0-100 compromise risk score with signals, a risk tier and recommendations
//!
//! Results are cached in memory per analyzer (15 and 30 minute windows).

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{
    CompromiseAnalyzer, ProxyMetrics, ReputationScorer, WalletEngine,
};
pub use models::{
    AppError, AppResult, Badge, CompromiseResult, CompromiseSignal, EngineConfig, ErrorCode,
    RedFlag, ReputationResult, RiskLevel, ServerConfig, SignalType, TrustLevel, WalletMetrics,
};
pub use providers::{ChainDataSource, RpcProvider, WalletSnapshot};
pub use utils::{is_valid_address, CacheStats, Clock, ManualClock, ResultCache, SystemClock};
