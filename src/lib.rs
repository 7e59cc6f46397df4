#![forbid(unsafe_code)]

//! Deterministic pricing core for a construction-materials marketplace.
//!
//! Ingests a time-ordered log of price signals and, per event, emits one
//! authoritative price decision, one canonical audit line, and an updated
//! SHA-256-fingerprinted state snapshot. Identical inputs produce
//! byte-identical outputs on any platform.

pub mod cli;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod replay;
pub mod store;
pub mod synth;
pub mod telemetry;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    canon_sha256_hex, evaluate, floor_div, median_int, sha256_hex, to_canon_json_bytes,
    AuditRecord, CanonJsonError, Decision, EngineState, EventError, EventId, Flag, ItemId,
    ItemQuotes, ItemState, Observation, Outcome, PriceCache, PriceEvent, Source, Verdict,
    BIAS_DECAY_AFTER_SECS, BREAKER_THRESHOLD_PCT, DELTA_WINDOW, STATE_VERSION,
    SUPPLIER_FRESHNESS_SECS,
};
pub use crate::pipeline::{process_events, read_events, PipelineError, RunSummary};
pub use crate::replay::ReplayError;
pub use crate::store::StoreError;
