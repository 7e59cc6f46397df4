//! Core domain types for the truth engine.
//!
//! Module hierarchy follows type dependency order:
//! - identity: EventId, ItemId
//! - domain: Source, Outcome, Decision, Flag
//! - event: PriceEvent wire record + validation
//! - json_canon: canonical byte form + SHA-256 fingerprints
//! - state: ItemState, EngineState, median/floor arithmetic
//! - cache: run-scoped latest-observation cache
//! - rules: the evaluator (Rules A-E)
//! - audit: per-event audit records

pub mod audit;
pub mod cache;
pub mod domain;
pub mod event;
pub mod identity;
pub mod json_canon;
pub mod rules;
pub mod state;

pub use audit::AuditRecord;
pub use cache::{ItemQuotes, Observation, PriceCache};
pub use domain::{Decision, Flag, Outcome, Source};
pub use event::{EventError, PriceEvent};
pub use identity::{EventId, ItemId};
pub use json_canon::{canon_sha256_hex, sha256_hex, to_canon_json_bytes, CanonJsonError};
pub use rules::{
    evaluate, Verdict, BIAS_DECAY_AFTER_SECS, BREAKER_THRESHOLD_PCT, SUPPLIER_FRESHNESS_SECS,
};
pub use state::{floor_div, median_int, EngineState, ItemState, DELTA_WINDOW, STATE_VERSION};
