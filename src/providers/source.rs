//! Chain Data Source abstraction.
//!
//! The engine only needs two read-only capabilities: the transaction count
//! (nonce) and the native balance of an address.

use alloy_primitives::U256;
use async_trait::async_trait;
use futures_util::future::try_join;

use crate::models::errors::AppResult;

/// Raw on-chain observations the analyzers work from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub tx_count: u64,
    /// Balance in wei; only ever compared against zero
    pub balance: U256,
}

impl WalletSnapshot {
    pub fn has_balance(&self) -> bool {
        !self.balance.is_zero()
    }
}

#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Number of transactions sent from `address`
    async fn get_transaction_count(&self, address: &str) -> AppResult<u64>;

    /// Native balance of `address` in the smallest unit
    async fn get_balance(&self, address: &str) -> AppResult<U256>;

    /// Both reads, issued concurrently. Fails if either read fails.
    async fn fetch_snapshot(&self, address: &str) -> AppResult<WalletSnapshot> {
        let (tx_count, balance) =
            try_join(self.get_transaction_count(address), self.get_balance(address)).await?;
        Ok(WalletSnapshot { tx_count, balance })
    }
}
