//! Reputation Scoring Module
//!
//! Turns a transaction count into a 0-100 trust score:
//! - four threshold-table sub-scores (age, transactions, active days, contracts)
//! - penalty flags subtracted from the sum
//! - descriptive badges with no scoring effect
//! - a trust tier (danger / caution / good / excellent)

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::core::estimator::ProxyMetrics;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    Badge, ContractMetric, CountMetric, RedFlag, ReputationResult, TrustLevel, WalletAgeMetric,
    WalletMetrics,
};
use crate::providers::source::ChainDataSource;
use crate::utils::cache::ResultCache;
use crate::utils::constants::{
    DORMANCY_WINDOW_DAYS, PENALTY_DORMANT_AFTER_WEEK, PENALTY_SAME_DAY_CREATION,
    PENALTY_SINGLE_CONTRACT,
};
use crate::utils::validation::validate_address;

pub const FLAG_SAME_DAY_CREATION: &str = "same-day-creation";
pub const FLAG_SINGLE_CONTRACT: &str = "single-contract";
pub const FLAG_DORMANT_AFTER_WEEK: &str = "dormant-after-week";

// ============================================
// Sub-score tables (upper bounds inclusive)
// ============================================

pub fn wallet_age_score(days: u64) -> u8 {
    match days {
        0..=6 => 0,
        7..=30 => 10,
        31..=180 => 20,
        _ => 30,
    }
}

pub fn transaction_score(count: u64) -> u8 {
    match count {
        0..=4 => 5,
        5..=50 => 15,
        51..=300 => 22,
        _ => 25,
    }
}

pub fn active_days_score(days: u64) -> u8 {
    match days {
        0..=1 => 0,
        2..=7 => 7,
        8..=30 => 12,
        _ => 15,
    }
}

pub fn contract_score(count: u64) -> u8 {
    match count {
        0 => 0,
        1..=3 => 8,
        4..=10 => 12,
        _ => 15,
    }
}

/// Score the proxy metrics
pub fn build_metrics(proxy: &ProxyMetrics, now: DateTime<Utc>) -> WalletMetrics {
    WalletMetrics {
        wallet_age: WalletAgeMetric {
            days: proxy.estimated_days,
            score: wallet_age_score(proxy.estimated_days),
            first_tx_date: proxy.first_tx_date(now),
        },
        transactions: CountMetric {
            count: proxy.tx_count,
            score: transaction_score(proxy.tx_count),
        },
        active_days: CountMetric {
            count: proxy.estimated_active_days,
            score: active_days_score(proxy.estimated_active_days),
        },
        contract_interactions: ContractMetric {
            count: proxy.estimated_contracts,
            score: contract_score(proxy.estimated_contracts),
            contracts: Vec::new(),
        },
    }
}

fn flag(id: &str, message: &str, penalty: u32) -> RedFlag {
    RedFlag {
        id: id.to_string(),
        message: message.to_string(),
        penalty,
    }
}

/// Each check runs independently; no flag suppresses another.
pub fn detect_red_flags(metrics: &WalletMetrics, tx_timestamps: &[DateTime<Utc>]) -> Vec<RedFlag> {
    let mut flags = Vec::new();
    let age_days = metrics.wallet_age.days;
    let tx_count = metrics.transactions.count;

    if age_days == 0 && tx_count > 0 {
        flags.push(flag(
            FLAG_SAME_DAY_CREATION,
            "Wallet created and active on same day",
            PENALTY_SAME_DAY_CREATION,
        ));
    }

    if metrics.contract_interactions.count == 1 && tx_count > 5 {
        flags.push(flag(
            FLAG_SINGLE_CONTRACT,
            "Only interacted with 1 contract",
            PENALTY_SINGLE_CONTRACT,
        ));
    }

    if let (Some(first), Some(last)) = (tx_timestamps.first(), tx_timestamps.last()) {
        let first_week_end = *first + Duration::days(DORMANCY_WINDOW_DAYS);
        if age_days > 30 && *last < first_week_end && age_days > 7 {
            flags.push(flag(
                FLAG_DORMANT_AFTER_WEEK,
                "No activity after first week",
                PENALTY_DORMANT_AFTER_WEEK,
            ));
        }
    }

    flags
}

fn badge(id: &str, emoji: &str, label: &str, description: &str) -> Badge {
    Badge {
        id: id.to_string(),
        emoji: emoji.to_string(),
        label: label.to_string(),
        description: description.to_string(),
    }
}

pub fn assign_badges(metrics: &WalletMetrics, flags: &[RedFlag]) -> Vec<Badge> {
    let mut badges = Vec::new();

    if metrics.wallet_age.days > 180 {
        badges.push(badge("old-wallet", "🏆", "Old Wallet", "Wallet is over 6 months old"));
    }

    if metrics.wallet_age.days <= 7 {
        badges.push(badge("fresh-wallet", "🌱", "Fresh Wallet", "Wallet is less than a week old"));
    }

    if metrics.active_days.count > 30 {
        badges.push(badge(
            "consistent-activity",
            "⚡",
            "Consistent Activity",
            "Active on more than 30 different days",
        ));
    }

    if metrics.transactions.count > 300 {
        badges.push(badge("power-user", "🚀", "Power User", "Over 300 transactions"));
    }

    if metrics.contract_interactions.count > 10 {
        badges.push(badge("defi-explorer", "🔮", "DeFi Explorer", "Interacted with 10+ contracts"));
    }

    if flags.iter().any(|f| f.id == FLAG_DORMANT_AFTER_WEEK) {
        badges.push(badge("dormant", "😴", "Dormant Wallet", "No recent activity"));
    }

    badges
}

/// Sub-scores minus penalties, clamped to [0, 100]
pub fn final_score(metrics: &WalletMetrics, flags: &[RedFlag]) -> u8 {
    let penalty: i64 = flags.iter().map(|f| i64::from(f.penalty)).sum();
    (metrics.base_score() - penalty).clamp(0, 100) as u8
}

/// Full reputation computation from a transaction count, no I/O
pub fn score_wallet(address: &str, tx_count: u64, now: DateTime<Utc>) -> ReputationResult {
    let proxy = ProxyMetrics::from_tx_count(tx_count);
    let metrics = build_metrics(&proxy, now);
    let timestamps = proxy.synthetic_timestamps(now);

    let flags = detect_red_flags(&metrics, &timestamps);
    let badges = assign_badges(&metrics, &flags);
    let score = final_score(&metrics, &flags);
    let level = TrustLevel::from_score(score);

    ReputationResult {
        address: address.to_string(),
        final_score: score,
        trust_level: level,
        trust_label: level.label().to_string(),
        metrics,
        flags,
        badges,
        fetched_at: now,
    }
}

/// Reputation scorer backed by a chain data source and a result cache
#[derive(Clone)]
pub struct ReputationScorer {
    source: Arc<dyn ChainDataSource>,
    cache: ResultCache<ReputationResult>,
}

impl ReputationScorer {
    pub fn new(source: Arc<dyn ChainDataSource>, cache: ResultCache<ReputationResult>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &ResultCache<ReputationResult> {
        &self.cache
    }

    /// Cached reputation for `address`; hits the chain at most once per window
    pub async fn calculate_reputation(&self, address: &str) -> AppResult<ReputationResult> {
        self.calculate(address, false).await
    }

    /// Recompute from the chain and overwrite the cached entry
    pub async fn refresh(&self, address: &str) -> AppResult<ReputationResult> {
        self.calculate(address, true).await
    }

    pub async fn calculate(&self, address: &str, force_refresh: bool) -> AppResult<ReputationResult> {
        validate_address(address)?;

        if !force_refresh {
            if let Some(cached) = self.cache.get(address) {
                return Ok(cached);
            }
        }

        // Balance is fetched alongside the count but not scored here
        let snapshot = self.source.fetch_snapshot(address).await.map_err(|e| {
            error!(address = %address, error = %e, "Error fetching wallet data");
            AppError::fetch_failed(e)
        })?;

        let result = score_wallet(address, snapshot.tx_count, self.cache.now());
        info!(
            address = %address,
            score = result.final_score,
            trust_level = result.trust_level.as_str(),
            flags = result.flags.len(),
            "Reputation calculated"
        );
        debug!("{}", result.summary());

        self.cache.set(address, result.clone());
        Ok(result)
    }
}
