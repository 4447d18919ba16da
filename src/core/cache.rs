//! In-memory LRU cache of analytics snapshots
//!
//! The database is the source of truth; this only saves re-reading and
//! re-parsing snapshot JSON when one process asks for the same player's
//! numbers several times. Every write of a player's snapshot must also go
//! through [`SnapshotCache::put`].

use lru::LruCache;
use std::{
    num::NonZeroUsize,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::storage::StoredSnapshot;
use crate::PlayerId;

/// Snapshots kept in memory when no capacity is given.
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 16;

pub struct SnapshotCache {
    memory_cache: Mutex<LruCache<PlayerId, StoredSnapshot>>,
    memory_capacity: NonZeroUsize,
}

impl SnapshotCache {
    /// Create a cache holding up to `memory_capacity` snapshots (at least one).
    pub fn new(memory_capacity: usize) -> Self {
        let memory_capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Mutex::new(LruCache::new(memory_capacity)),
            memory_capacity,
        }
    }

    // Entries are whole clones, so a poisoned lock still holds valid data.
    fn lock(&self) -> MutexGuard<'_, LruCache<PlayerId, StoredSnapshot>> {
        self.memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, player_id: PlayerId) -> Option<StoredSnapshot> {
        self.lock().get(&player_id).cloned()
    }

    pub fn put(&self, stored: StoredSnapshot) {
        self.lock().put(stored.snapshot.player_id, stored);
    }

    /// (entries in memory, capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.lock().len(), self.memory_capacity.get())
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_CAPACITY)
    }
}
