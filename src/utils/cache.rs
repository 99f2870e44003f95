//! In-Memory Result Cache
//!
//! Thread-safe, time-boxed cache for analysis results, one instance per
//! analyzer. Uses DashMap for concurrent access without a global lock.
//!
//! Features:
//! - TTL-based expiration measured against an injectable clock
//! - Address normalization (lowercase)
//! - Cache HIT/MISS logging and counters

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::utils::clock::Clock;
use crate::utils::validation::normalize_address;

/// Cache entry with the time the result was computed
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub result: T,
    pub created_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Age of the entry at `now`; zero if the clock moved backwards
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or_default()
    }

    /// An entry is fresh while strictly younger than `ttl`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    /// Remaining lifetime in whole seconds
    pub fn remaining_ttl(&self, now: DateTime<Utc>, ttl: Duration) -> u64 {
        ttl.saturating_sub(self.age(now)).as_secs()
    }
}

/// Per-analyzer result cache keyed by lowercase address
pub struct ResultCache<T> {
    /// Label used in log lines ("reputation", "compromise")
    name: &'static str,
    store: Arc<DashMap<String, CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl<T> Clone for ResultCache<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            store: self.store.clone(),
            ttl: self.ttl,
            clock: self.clock.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

impl<T: Clone> ResultCache<T> {
    pub fn new(name: &'static str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            store: Arc::new(DashMap::new()),
            ttl,
            clock,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current time according to the cache's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached result if present and still fresh.
    /// Expired entries are removed on access.
    pub fn get(&self, address: &str) -> Option<T> {
        let key = normalize_address(address);
        let now = self.now();

        if let Some(entry) = self.store.get(&key) {
            if entry.is_expired(now, self.ttl) {
                drop(entry); // Release read lock
                self.store.remove(&key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("📭 {} CACHE MISS (expired): {}", self.name, key);
                None
            } else {
                self.hits.fetch_add(1, Ordering::Relaxed);
                info!(
                    "✅ {} CACHE HIT: {} (TTL: {}s remaining)",
                    self.name,
                    key,
                    entry.remaining_ttl(now, self.ttl)
                );
                Some(entry.result.clone())
            }
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("📭 {} CACHE MISS: {}", self.name, key);
            None
        }
    }

    /// Store a result stamped with the current time. Overwrites any
    /// existing entry for the same address (last write wins).
    pub fn set(&self, address: &str, result: T) {
        let key = normalize_address(address);
        let entry = CacheEntry {
            result,
            created_at: self.now(),
        };

        self.store.insert(key.clone(), entry);
        info!("💾 {} CACHE SET: {} (TTL: {}s)", self.name, key, self.ttl.as_secs());
    }

    /// Drop every expired entry, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let now = self.now();
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired(now, self.ttl));
        let removed = before.saturating_sub(self.store.len());
        if removed > 0 {
            info!("🧹 {} CACHE CLEANUP: {} expired entries removed", self.name, removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.store.len(),
            hits,
            misses,
            hit_rate,
            ttl_secs: self.ttl.as_secs(),
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub ttl_secs: u64,
}
