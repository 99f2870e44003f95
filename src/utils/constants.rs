//! Constants Module - Single Source of Truth
//!
//! Every endpoint, window and threshold used across the engine lives here.
//! The scoring tables are the product's current behavior; change them only
//! as a deliberate behavior change.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "WalletSentinel";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = "WalletSentinel/0.1.0";

// ============================================
// CHAIN DATA SOURCE
// ============================================

/// Base mainnet chain ID
pub const CHAIN_ID_BASE: u64 = 8453;

/// Fixed public RPC endpoint for Base mainnet
pub const BASE_MAINNET_RPC_URL: &str = "https://mainnet.base.org";

/// Environment variable that overrides the RPC endpoint
pub const RPC_URL_ENV: &str = "BASE_HTTP_URL";

/// Default timeout for RPC requests (seconds)
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Native token symbol, used in signal details
pub const NATIVE_SYMBOL: &str = "ETH";

// ============================================
// CACHE WINDOWS
// ============================================

/// Reputation results stay fresh for 15 minutes
pub const REPUTATION_CACHE_TTL_SECS: u64 = 15 * 60;

/// Compromise results stay fresh for 30 minutes
pub const COMPROMISE_CACHE_TTL_SECS: u64 = 30 * 60;

/// Interval of the background expired-entry sweep (seconds)
pub const CACHE_CLEANUP_INTERVAL_SECS: u64 = 60;

// ============================================
// METRIC ESTIMATION
// ============================================

/// One estimated day of wallet age per this many transactions
pub const TXS_PER_ESTIMATED_DAY: u64 = 2;

/// Estimated age never exceeds one year
pub const MAX_ESTIMATED_DAYS: u64 = 365;

/// One estimated active day per this many transactions
pub const TXS_PER_ACTIVE_DAY: u64 = 5;

/// One estimated distinct contract per this many transactions
pub const TXS_PER_CONTRACT: u64 = 10;

/// Estimated distinct contracts cap
pub const MAX_ESTIMATED_CONTRACTS: u64 = 15;

// ============================================
// REPUTATION
// ============================================

/// Highest score the four sub-metrics can reach together
pub const MAX_METRIC_SCORE: u8 = 30 + 25 + 15 + 15;

/// Window after the first transaction used by the dormancy flag (days)
pub const DORMANCY_WINDOW_DAYS: i64 = 7;

pub const PENALTY_SAME_DAY_CREATION: u32 = 10;
pub const PENALTY_SINGLE_CONTRACT: u32 = 5;
pub const PENALTY_DORMANT_AFTER_WEEK: u32 = 10;

// ============================================
// COMPROMISE
// ============================================

/// Potential sweep requires more than this many transactions
pub const SWEEP_MIN_TX: u64 = 10;
/// Potential sweep points are capped here
pub const SWEEP_MAX_POINTS: u32 = 40;
/// Potential sweep is only reported at or above this many points
pub const SWEEP_MIN_POINTS: u32 = 20;

/// Burst activity requires more than this many transactions
pub const BURST_MIN_TX: u64 = 100;
/// Transactions per estimated day above which activity counts as a burst
pub const BURST_TX_PER_DAY: f64 = 20.0;
pub const BURST_POINTS: u32 = 20;

/// Inclusive transaction range for the dormant-empty signal
pub const DORMANT_EMPTY_TX_RANGE: (u64, u64) = (5, 50);
pub const DORMANT_EMPTY_POINTS: u32 = 10;

/// Exclusive transaction range for the scripted-pattern signal
pub const SCRIPTED_TX_RANGE: (u64, u64) = (50, 200);
pub const SCRIPTED_POINTS: u32 = 10;

/// Risk score at or above which a wallet is likely compromised
pub const HIGH_RISK_THRESHOLD: u8 = 70;
/// Risk score at or above which activity is suspicious
pub const MEDIUM_RISK_THRESHOLD: u8 = 40;
