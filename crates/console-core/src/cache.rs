//! # Resource Cache
//!
//! The single in-memory source of truth for "the current collection". The
//! cache holds one of four states and is only ever advanced by the session
//! that owns it, so it needs no interior locking.
//!
//! # Fetch epochs
//! Every fetch issued through [`ResourceCache::begin_load`] gets a fresh epoch
//! number. Fetches are allowed to overlap (a retry while one is in flight, a
//! reload racing an earlier reload) and may resolve out of order; only the
//! resolution carrying the most recently issued epoch is applied. Superseded
//! resolutions are dropped, so the displayed state always corresponds to a
//! completed fetch and a stale response never overwrites a newer one.

use crate::entity::ConsoleEntity;
use crate::gateway::GatewayError;
use tracing::{debug, warn};

/// Lifecycle states of the cached collection. Exactly one is active.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheState<T> {
    /// Created, nothing fetched yet.
    Idle,
    /// A fetch is in flight and no newer terminal state has arrived.
    Loading,
    /// The collection as of the last applied fetch.
    Ready(Vec<T>),
    /// The last applied fetch failed; the payload is the opaque diagnostic.
    Error(String),
}

impl<T> CacheState<T> {
    /// Tag name for structured logging.
    pub fn tag(&self) -> &'static str {
        match self {
            CacheState::Idle => "idle",
            CacheState::Loading => "loading",
            CacheState::Ready(_) => "ready",
            CacheState::Error(_) => "error",
        }
    }
}

/// Owned by one session; created `Idle`, refreshed after every successful
/// mutation or explicit retry by an explicit `begin_load` call.
#[derive(Debug)]
pub struct ResourceCache<T: ConsoleEntity> {
    state: CacheState<T>,
    epoch: u64,
}

impl<T: ConsoleEntity> ResourceCache<T> {
    pub fn new() -> Self {
        Self {
            state: CacheState::Idle,
            epoch: 0,
        }
    }

    /// Current tag and payload, for projection.
    pub fn state(&self) -> &CacheState<T> {
        &self.state
    }

    /// Enter `Loading` synchronously and return the epoch the caller must
    /// attach to the fetch it dispatches.
    pub fn begin_load(&mut self) -> u64 {
        self.epoch += 1;
        self.state = CacheState::Loading;
        self.epoch
    }

    /// Apply a fetch resolution. Returns `false` when the resolution was
    /// superseded by a newer `begin_load` and has been dropped.
    pub fn settle(&mut self, epoch: u64, outcome: Result<Vec<T>, GatewayError>) -> bool {
        if epoch != self.epoch {
            debug!(epoch, current = self.epoch, "superseded fetch dropped");
            return false;
        }
        self.state = match outcome {
            Ok(records) => CacheState::Ready(dedupe_by_id(records)),
            Err(reason) => CacheState::Error(reason.to_string()),
        };
        true
    }
}

impl<T: ConsoleEntity> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Enforce the collection invariant: no two entries share an id.
/// The first occurrence wins; later duplicates are dropped with a warning.
fn dedupe_by_id<T: ConsoleEntity>(records: Vec<T>) -> Vec<T> {
    let mut seen: Vec<T::Id> = Vec::with_capacity(records.len());
    let mut unique = Vec::with_capacity(records.len());
    for record in records {
        if seen.contains(record.id()) {
            warn!(id = %record.id(), "duplicate id in fetched collection, entry dropped");
            continue;
        }
        seen.push(record.id().clone());
        unique.push(record);
    }
    unique
}
