//! Type definitions for Wallet Sentinel
//! Result shapes consumed by the presentation layer.
//!
//! Field names serialize in camelCase; the JSON shape is part of the
//! compatibility surface and must not drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::constants::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};

// ============================================
// Reputation
// ============================================

/// Trust tier derived from the reputation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    Danger,
    Caution,
    Good,
    Excellent,
}

impl TrustLevel {
    /// Classify a final score (upper bounds inclusive)
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=30 => Self::Danger,
            31..=60 => Self::Caution,
            61..=85 => Self::Good,
            _ => Self::Excellent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Caution => "caution",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Danger => "High Risk",
            Self::Caution => "Proceed with Caution",
            Self::Good => "Trusted",
            Self::Excellent => "Highly Trusted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAgeMetric {
    pub days: u64,
    pub score: u8,
    /// Estimated first transaction time, `None` when the wallet has no age
    pub first_tx_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMetric {
    pub count: u64,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetric {
    pub count: u64,
    pub score: u8,
    /// Contract addresses interacted with. Not resolved yet, always empty.
    pub contracts: Vec<String>,
}

/// The four scored sub-metrics of a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMetrics {
    pub wallet_age: WalletAgeMetric,
    pub transactions: CountMetric,
    pub active_days: CountMetric,
    pub contract_interactions: ContractMetric,
}

impl WalletMetrics {
    /// Sum of the four sub-scores, before penalties
    pub fn base_score(&self) -> i64 {
        i64::from(self.wallet_age.score)
            + i64::from(self.transactions.score)
            + i64::from(self.active_days.score)
            + i64::from(self.contract_interactions.score)
    }
}

/// A penalty condition detected on a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub id: String,
    pub message: String,
    pub penalty: u32,
}

/// Descriptive tag, no effect on the score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub emoji: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationResult {
    /// Address exactly as supplied by the caller
    pub address: String,
    pub final_score: u8,
    pub trust_level: TrustLevel,
    pub trust_label: String,
    pub metrics: WalletMetrics,
    pub flags: Vec<RedFlag>,
    pub badges: Vec<Badge>,
    pub fetched_at: DateTime<Utc>,
}

impl ReputationResult {
    /// One-line-per-field summary for logs
    pub fn summary(&self) -> String {
        let mut output = format!(
            "\nReputation: {}/100 ({}) | {}\n",
            self.final_score, self.trust_label, self.address
        );
        output.push_str(&format!(
            "   Age: {}d | Txs: {} | Active days: {} | Contracts: {}\n",
            self.metrics.wallet_age.days,
            self.metrics.transactions.count,
            self.metrics.active_days.count,
            self.metrics.contract_interactions.count
        ));

        if !self.flags.is_empty() {
            output.push_str("   Flags:\n");
            for flag in &self.flags {
                output.push_str(&format!("     - {} (-{})\n", flag.message, flag.penalty));
            }
        }

        if !self.badges.is_empty() {
            let badges: Vec<String> = self
                .badges
                .iter()
                .map(|b| format!("{} {}", b.emoji, b.label))
                .collect();
            output.push_str(&format!("   Badges: {}\n", badges.join(", ")));
        }

        output
    }
}

// ============================================
// Compromise
// ============================================

/// Risk tier derived from the compromise score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a risk score (lower bounds inclusive)
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "NO STRONG SIGNS",
            Self::Medium => "SUSPICIOUS ACTIVITY",
            Self::High => "LIKELY COMPROMISED",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "✅",
            Self::Medium => "🟠",
            Self::High => "🔴",
        }
    }
}

/// Severity of a single compromise signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompromiseSignal {
    pub id: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub title: String,
    pub message: String,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompromiseResult {
    /// Address exactly as supplied by the caller
    pub address: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_label: String,
    pub signals: Vec<CompromiseSignal>,
    pub recommendations: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl CompromiseResult {
    /// Pretty print the analysis result
    pub fn summary(&self) -> String {
        let mut output = format!(
            "\n{} Compromise risk: {}/100 ({}) | {}\n",
            self.risk_level.emoji(),
            self.risk_score,
            self.risk_label,
            self.address
        );

        if !self.signals.is_empty() {
            output.push_str("   Signals:\n");
            for signal in &self.signals {
                output.push_str(&format!("     - {} (+{})\n", signal.title, signal.points));
            }
        }

        output
    }
}
