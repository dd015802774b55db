use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::address::Address;
use crate::types::WalletSnapshot;

/// Default upper bound on cached snapshots.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

// ==============================================================================
// Cache Trait
// ==============================================================================

/// Address-keyed snapshot store consulted before any upstream call.
///
/// Last write wins: the ledger is the source of truth, so a concurrent
/// overwrite within the TTL window is never worse than the entry it replaces.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Return the live snapshot for `address`, if any. Never extends its TTL.
    async fn get(&self, address: &Address) -> Option<WalletSnapshot>;

    /// Store `snapshot`, expiring `ttl` after this call.
    async fn put(&self, address: Address, snapshot: WalletSnapshot, ttl: Duration);
}

// ==============================================================================
// TTL Cache
// ==============================================================================

struct CacheEntry {
    snapshot: WalletSnapshot,
    expires_at: Instant,
}

/// In-memory fixed-TTL cache with least-recently-used eviction once
/// `capacity` entries are held.
///
/// Expired entries are dropped lazily when looked up.
pub struct TtlCache {
    entries: Mutex<LruCache<Address, CacheEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotCache for TtlCache {
    async fn get(&self, address: &Address) -> Option<WalletSnapshot> {
        let mut entries = self.entries.lock().await;
        match entries.get(address) {
            None => return None,
            Some(entry) if Instant::now() < entry.expires_at => {
                return Some(entry.snapshot.clone());
            }
            Some(_) => {}
        }
        entries.pop(address);
        None
    }

    async fn put(&self, address: Address, snapshot: WalletSnapshot, ttl: Duration) {
        let entry = CacheEntry {
            snapshot,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.put(address, entry);
    }
}
