//! Compromise Analysis Module
//!
//! Heuristic signals over (transaction count, balance) that point at a
//! drained or hijacked wallet. Signals are additive; the summed points are
//! clamped to 0-100 and mapped to a risk tier with fixed recommendations.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{CompromiseResult, CompromiseSignal, RiskLevel, SignalType};
use crate::providers::source::{ChainDataSource, WalletSnapshot};
use crate::utils::cache::ResultCache;
use crate::utils::constants::{
    BURST_MIN_TX, BURST_POINTS, BURST_TX_PER_DAY, DORMANT_EMPTY_POINTS, DORMANT_EMPTY_TX_RANGE,
    NATIVE_SYMBOL, SCRIPTED_POINTS, SCRIPTED_TX_RANGE, SWEEP_MAX_POINTS, SWEEP_MIN_POINTS,
    SWEEP_MIN_TX,
};
use crate::utils::validation::validate_address;

pub const SIGNAL_POTENTIAL_SWEEP: &str = "potential-sweep";
pub const SIGNAL_BURST_ACTIVITY: &str = "burst-activity";
pub const SIGNAL_DORMANT_EMPTY: &str = "dormant-empty";
pub const SIGNAL_SCRIPTED_PATTERN: &str = "scripted-pattern";

fn signal(
    id: &str,
    signal_type: SignalType,
    title: &str,
    message: &str,
    points: u32,
    details: String,
) -> CompromiseSignal {
    CompromiseSignal {
        id: id.to_string(),
        signal_type,
        title: title.to_string(),
        message: message.to_string(),
        points,
        timestamp: None,
        details: Some(details),
    }
}

/// Points for the sweep heuristic: five per five transactions, capped
pub fn sweep_points(tx_count: u64) -> u32 {
    let raw = (tx_count / 5).saturating_mul(5);
    raw.min(u64::from(SWEEP_MAX_POINTS)) as u32
}

/// Evaluate every heuristic against a snapshot
pub fn detect_signals(snapshot: &WalletSnapshot) -> Vec<CompromiseSignal> {
    let tx_count = snapshot.tx_count;
    let has_balance = snapshot.has_balance();
    let mut signals = Vec::new();

    // Many transactions but nothing left: funds may have been swept
    if tx_count > SWEEP_MIN_TX && !has_balance {
        let points = sweep_points(tx_count);
        if points >= SWEEP_MIN_POINTS {
            signals.push(signal(
                SIGNAL_POTENTIAL_SWEEP,
                SignalType::Warning,
                "Potential Fund Sweep Detected",
                "Wallet has transaction history but zero balance, which may indicate funds were swept.",
                points,
                format!(
                    "{} transactions recorded, but current balance is 0 {}",
                    tx_count, NATIVE_SYMBOL
                ),
            ));
        }
    }

    if tx_count > BURST_MIN_TX {
        let estimated_days = (tx_count / 10).max(1);
        let tx_per_day = tx_count as f64 / estimated_days as f64;

        if tx_per_day > BURST_TX_PER_DAY {
            signals.push(signal(
                SIGNAL_BURST_ACTIVITY,
                SignalType::Warning,
                "Unusual High-Frequency Activity",
                "Wallet shows patterns of automated or burst transaction activity.",
                BURST_POINTS,
                format!("Approximately {} transactions per day average", tx_per_day.round() as u64),
            ));
        }
    }

    let (dormant_min, dormant_max) = DORMANT_EMPTY_TX_RANGE;
    if (dormant_min..=dormant_max).contains(&tx_count) && !has_balance {
        signals.push(signal(
            SIGNAL_DORMANT_EMPTY,
            SignalType::Info,
            "Dormant After Activity",
            "Wallet shows signs of prior activity but appears dormant with zero balance.",
            DORMANT_EMPTY_POINTS,
            "Activity ceased after funds were removed".to_string(),
        ));
    }

    let (scripted_low, scripted_high) = SCRIPTED_TX_RANGE;
    if tx_count > scripted_low && tx_count < scripted_high {
        signals.push(signal(
            SIGNAL_SCRIPTED_PATTERN,
            SignalType::Info,
            "Potentially Scripted Activity",
            "Transaction patterns suggest possible automated usage.",
            SCRIPTED_POINTS,
            format!("{} transactions detected", tx_count),
        ));
    }

    signals
}

/// Sum of signal points, clamped to [0, 100]
pub fn risk_score(signals: &[CompromiseSignal]) -> u8 {
    let total: u64 = signals.iter().map(|s| u64::from(s.points)).sum();
    total.min(100) as u8
}

/// Fixed advice per tier
pub fn recommendations(level: RiskLevel) -> Vec<String> {
    let items: &[&str] = match level {
        RiskLevel::High => &[
            "Revoke all token approvals immediately",
            "Transfer remaining funds to a new, secure wallet",
            "Create a new wallet with fresh seed phrase",
            "Do NOT sign any new transactions from this wallet",
            "Check for any pending transactions and cancel them",
        ],
        RiskLevel::Medium => &[
            "Review and revoke unnecessary token approvals",
            "Monitor wallet activity closely",
            "Consider moving high-value assets to a new wallet",
            "Enable notifications for wallet transactions",
        ],
        RiskLevel::Low => &[
            "No immediate action required",
            "Continue monitoring wallet activity",
            "Regularly review token approvals as best practice",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Full compromise analysis from a snapshot, no I/O
pub fn evaluate(
    address: &str,
    snapshot: &WalletSnapshot,
    now: chrono::DateTime<chrono::Utc>,
) -> CompromiseResult {
    let signals = detect_signals(snapshot);
    let score = risk_score(&signals);
    let level = RiskLevel::from_score(score);

    CompromiseResult {
        address: address.to_string(),
        risk_score: score,
        risk_level: level,
        risk_label: level.label().to_string(),
        signals,
        recommendations: recommendations(level),
        fetched_at: now,
    }
}

/// Compromise analyzer backed by a chain data source and its own cache
#[derive(Clone)]
pub struct CompromiseAnalyzer {
    source: Arc<dyn ChainDataSource>,
    cache: ResultCache<CompromiseResult>,
}

impl CompromiseAnalyzer {
    pub fn new(source: Arc<dyn ChainDataSource>, cache: ResultCache<CompromiseResult>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &ResultCache<CompromiseResult> {
        &self.cache
    }

    pub async fn analyze_compromise(&self, address: &str) -> AppResult<CompromiseResult> {
        self.analyze(address, false).await
    }

    /// Re-run the analysis and overwrite the cached entry
    pub async fn refresh(&self, address: &str) -> AppResult<CompromiseResult> {
        self.analyze(address, true).await
    }

    pub async fn analyze(&self, address: &str, force_refresh: bool) -> AppResult<CompromiseResult> {
        validate_address(address)?;

        if !force_refresh {
            if let Some(cached) = self.cache.get(address) {
                return Ok(cached);
            }
        }

        let snapshot = self.source.fetch_snapshot(address).await.map_err(|e| {
            error!(address = %address, error = %e, "Error analyzing wallet for compromise");
            AppError::analysis_failed(e)
        })?;

        let result = evaluate(address, &snapshot, self.cache.now());
        info!(
            address = %address,
            risk_score = result.risk_score,
            risk_level = result.risk_level.as_str(),
            signals = result.signals.len(),
            "Compromise analysis completed"
        );
        debug!("{}", result.summary());

        self.cache.set(address, result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use chrono::Utc;

    fn snapshot(tx_count: u64, balance: u64) -> WalletSnapshot {
        WalletSnapshot {
            tx_count,
            balance: U256::from(balance),
        }
    }

    fn ids(signals: &[CompromiseSignal]) -> Vec<&str> {
        signals.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_sweep_first_appears_at_twenty() {
        for tx in 0..20 {
            let signals = detect_signals(&snapshot(tx, 0));
            assert!(!ids(&signals).contains(&SIGNAL_POTENTIAL_SWEEP), "tx={}", tx);
        }
        let signals = detect_signals(&snapshot(20, 0));
        let sweep = signals.iter().find(|s| s.id == SIGNAL_POTENTIAL_SWEEP).unwrap();
        assert_eq!(sweep.points, 20);
        assert_eq!(sweep.signal_type, SignalType::Warning);
    }

    #[test]
    fn test_sweep_points_capped() {
        assert_eq!(sweep_points(24), 20);
        assert_eq!(sweep_points(35), 35);
        assert_eq!(sweep_points(150), 40);
        assert_eq!(sweep_points(u64::MAX), 40);
    }

    #[test]
    fn test_sweep_requires_empty_balance() {
        let signals = detect_signals(&snapshot(150, 1));
        assert_eq!(ids(&signals), vec![SIGNAL_SCRIPTED_PATTERN]);
    }

    #[test]
    fn test_dormant_empty_range() {
        assert!(ids(&detect_signals(&snapshot(4, 0))).is_empty());
        assert_eq!(ids(&detect_signals(&snapshot(5, 0))), vec![SIGNAL_DORMANT_EMPTY]);
        assert_eq!(
            ids(&detect_signals(&snapshot(50, 0))),
            vec![SIGNAL_POTENTIAL_SWEEP, SIGNAL_DORMANT_EMPTY]
        );
        assert!(ids(&detect_signals(&snapshot(30, 5))).is_empty());
    }

    #[test]
    fn test_scripted_range_exclusive() {
        assert!(!ids(&detect_signals(&snapshot(50, 1))).contains(&SIGNAL_SCRIPTED_PATTERN));
        assert!(ids(&detect_signals(&snapshot(51, 1))).contains(&SIGNAL_SCRIPTED_PATTERN));
        assert!(ids(&detect_signals(&snapshot(199, 1))).contains(&SIGNAL_SCRIPTED_PATTERN));
        assert!(!ids(&detect_signals(&snapshot(200, 1))).contains(&SIGNAL_SCRIPTED_PATTERN));
    }

    #[test]
    fn test_burst_estimate_stays_near_ten_per_day() {
        // days = tx / 10, so the rate never exceeds 20 for tx > 100
        for tx in 101..5_000 {
            assert!(!ids(&detect_signals(&snapshot(tx, 1))).contains(&SIGNAL_BURST_ACTIVITY));
        }
    }

    #[test]
    fn test_scenario_swept_scripted_wallet() {
        let result = evaluate(
            "0x0000000000000000000000000000000000000005",
            &snapshot(150, 0),
            Utc::now(),
        );
        assert_eq!(ids(&result.signals), vec![SIGNAL_POTENTIAL_SWEEP, SIGNAL_SCRIPTED_PATTERN]);
        assert_eq!(result.risk_score, 50);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.risk_label, "SUSPICIOUS ACTIVITY");
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_clean_wallet_is_low_risk() {
        let result = evaluate(
            "0x0000000000000000000000000000000000000006",
            &snapshot(0, 0),
            Utc::now(),
        );
        assert!(result.signals.is_empty());
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommendations[0], "No immediate action required");
    }

    #[test]
    fn test_risk_score_clamped() {
        let many: Vec<CompromiseSignal> = (0..6)
            .map(|i| signal("x", SignalType::Critical, "t", "m", 30, i.to_string()))
            .collect();
        assert_eq!(risk_score(&many), 100);
        assert_eq!(RiskLevel::from_score(risk_score(&many)), RiskLevel::High);
    }

    #[test]
    fn test_recommendation_counts() {
        assert_eq!(recommendations(RiskLevel::High).len(), 5);
        assert_eq!(recommendations(RiskLevel::Medium).len(), 4);
        assert_eq!(recommendations(RiskLevel::Low).len(), 3);
    }
}
