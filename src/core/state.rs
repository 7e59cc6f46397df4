//! Persistent engine state and the bias-learning arithmetic.
//!
//! EngineState is the single persisted root (`rules_state.json`). Its maps
//! and sets are B-tree collections so iteration order - and therefore the
//! canonical byte form - is fixed by key order, never by insertion or
//! hashing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::identity::{EventId, ItemId};
use super::json_canon::{canon_sha256_hex, CanonJsonError};

/// Schema tag for `rules_state.json`.
pub const STATE_VERSION: u32 = 1;

/// Bounded window of accepted-human deltas per item.
pub const DELTA_WINDOW: usize = 5;

/// Floor-to-negative-infinity division. Divisor must be positive.
///
/// `floor_div(-301, 2) == -151`, where truncating division would give -150.
pub fn floor_div(n: i64, d: i64) -> i64 {
    n.div_euclid(d)
}

/// Integer median: sort, take the middle; for even counts, the floor of the
/// mean of the two middles. Empty input yields 0.
pub fn median_int(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        floor_div(sorted[n / 2 - 1] + sorted[n / 2], 2)
    }
}

/// Per-item learned state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemState {
    /// Timestamp of the most recent event that wrote this item's learning
    /// state; 0 if none ever has.
    pub last_updated_ts: i64,
    /// Up to `DELTA_WINDOW` signed deltas, most-recent last.
    pub accepted_human_deltas_cents: Vec<i64>,
    /// Integer median of the delta window; 0 while the window is empty.
    pub bias_cents: i64,
}

impl ItemState {
    /// Record one accepted-human delta: push, evict past the window bound,
    /// recompute the median, and stamp the write time.
    pub fn learn_delta(&mut self, delta_cents: i64, ts: i64) {
        self.accepted_human_deltas_cents.push(delta_cents);
        while self.accepted_human_deltas_cents.len() > DELTA_WINDOW {
            self.accepted_human_deltas_cents.remove(0);
        }
        self.bias_cents = median_int(&self.accepted_human_deltas_cents);
        self.last_updated_ts = ts;
    }
}

/// The persisted root: everything the engine remembers between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub version: u32,
    pub items: BTreeMap<ItemId, ItemState>,
    pub seen_event_ids: BTreeSet<EventId>,
    /// Hex SHA-256 of the canonical form of the three fields above. Excluded
    /// from its own hashed payload.
    pub state_hash: String,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            items: BTreeMap::new(),
            seen_event_ids: BTreeSet::new(),
            state_hash: String::new(),
        }
    }
}

/// Shadow of the hashed fields; `state_hash` itself never enters the digest.
#[derive(Serialize)]
struct HashedFields<'a> {
    version: u32,
    items: &'a BTreeMap<ItemId, ItemState>,
    seen_event_ids: &'a BTreeSet<EventId>,
}

impl EngineState {
    /// Canonical fingerprint of the state as it stands.
    pub fn fingerprint(&self) -> Result<String, CanonJsonError> {
        canon_sha256_hex(&HashedFields {
            version: self.version,
            items: &self.items,
            seen_event_ids: &self.seen_event_ids,
        })
    }

    /// Recompute and store `state_hash`, returning it.
    pub fn refresh_hash(&mut self) -> Result<&str, CanonJsonError> {
        self.state_hash = self.fingerprint()?;
        Ok(&self.state_hash)
    }
}
