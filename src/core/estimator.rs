//! Metric Estimator
//!
//! Without an indexer there is no transaction history, so wallet age,
//! active days and distinct contracts are approximated from the nonce alone.
//! The divisors and caps are the product's current behavior.

use chrono::{DateTime, Duration, Utc};

use crate::utils::constants::{
    MAX_ESTIMATED_CONTRACTS, MAX_ESTIMATED_DAYS, TXS_PER_ACTIVE_DAY, TXS_PER_CONTRACT,
    TXS_PER_ESTIMATED_DAY,
};

/// Proxy metrics derived from a transaction count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyMetrics {
    pub tx_count: u64,
    pub estimated_days: u64,
    /// Never exceeds `estimated_days`
    pub estimated_active_days: u64,
    pub estimated_contracts: u64,
}

impl ProxyMetrics {
    pub fn from_tx_count(tx_count: u64) -> Self {
        let estimated_days = (tx_count / TXS_PER_ESTIMATED_DAY).min(MAX_ESTIMATED_DAYS);
        let estimated_active_days = (tx_count / TXS_PER_ACTIVE_DAY).min(estimated_days);
        let estimated_contracts = (tx_count / TXS_PER_CONTRACT + 1).min(MAX_ESTIMATED_CONTRACTS);

        Self {
            tx_count,
            estimated_days,
            estimated_active_days,
            estimated_contracts,
        }
    }

    /// `now` minus the estimated age, or `None` for a zero-day wallet
    pub fn first_tx_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.estimated_days == 0 {
            return None;
        }
        Some(now - Duration::days(self.estimated_days as i64))
    }

    /// Stand-in "history" for the flag checks: the estimated first
    /// transaction, followed by `now` when there is more than one transaction.
    pub fn synthetic_timestamps(&self, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut timestamps = Vec::with_capacity(2);
        if let Some(first) = self.first_tx_date(now) {
            timestamps.push(first);
            if self.tx_count > 1 {
                timestamps.push(now);
            }
        }
        timestamps
    }
}
