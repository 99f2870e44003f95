//! Wires the reputation scorer and compromise analyzer to one chain data
//! source, one clock and their own caches.

use std::sync::Arc;
use tracing::info;

use crate::core::compromise::CompromiseAnalyzer;
use crate::core::reputation::ReputationScorer;
use crate::models::config::EngineConfig;
use crate::models::errors::AppResult;
use crate::providers::rpc::RpcProvider;
use crate::providers::source::ChainDataSource;
use crate::utils::cache::ResultCache;
use crate::utils::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct WalletEngine {
    pub reputation: ReputationScorer,
    pub compromise: CompromiseAnalyzer,
}

impl WalletEngine {
    pub fn new(source: Arc<dyn ChainDataSource>, clock: Arc<dyn Clock>, config: &EngineConfig) -> Self {
        let reputation_cache = ResultCache::new("reputation", config.reputation_ttl, clock.clone());
        let compromise_cache = ResultCache::new("compromise", config.compromise_ttl, clock);

        Self {
            reputation: ReputationScorer::new(source.clone(), reputation_cache),
            compromise: CompromiseAnalyzer::new(source, compromise_cache),
        }
    }

    /// Production wiring: JSON-RPC provider and wall-clock time
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        let provider = RpcProvider::from_config(config)?;
        info!("✅ Chain data source ready ({})", provider.masked_url());
        Ok(Self::new(Arc::new(provider), Arc::new(SystemClock), config))
    }

    /// Sweep expired entries from both caches
    pub fn cleanup_expired(&self) -> usize {
        self.reputation.cache().cleanup_expired() + self.compromise.cache().cleanup_expired()
    }
}
