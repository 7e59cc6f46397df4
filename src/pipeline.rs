//! Event pipeline: validate, order, evaluate, audit.
//!
//! Processing order is `(timestamp, event_id)` ascending - part of the
//! contract, reproducible across implementations. Each committed event
//! advances the state fingerprint and emits exactly one canonical audit
//! line, flushed whole. Duplicates are skipped silently and advance nothing.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::{
    evaluate, AuditRecord, CanonJsonError, Decision, EngineState, PriceCache, PriceEvent,
};
use crate::store;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("INVALID_EVENT at line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },
    #[error("OUT_OF_ORDER: event {event_id} at ts {timestamp} observed after ts {prev_timestamp}")]
    OutOfOrder {
        event_id: String,
        timestamp: i64,
        prev_timestamp: i64,
    },
    #[error("failed to read events: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write audit line: {0}")]
    Audit(#[source] std::io::Error),
    #[error(transparent)]
    Canon(#[from] CanonJsonError),
}

/// Counters and the final fingerprint of one pipeline pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub final_hash: String,
    pub processed: u64,
    pub skipped_duplicates: u64,
}

/// Parse and validate one event per line. Blank lines are tolerated; any
/// malformed or semantically invalid line aborts with its 1-based number,
/// before the pipeline mutates anything.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<PriceEvent>, PipelineError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(PipelineError::Read)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: PriceEvent =
            serde_json::from_str(trimmed).map_err(|e| PipelineError::InvalidEvent {
                line: line_no,
                reason: e.to_string(),
            })?;
        event.validate().map_err(|e| PipelineError::InvalidEvent {
            line: line_no,
            reason: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Drive a batch of validated events through the evaluator, committing state
/// and writing one audit line per processed event.
pub fn process_events<W: Write>(
    state: &mut EngineState,
    mut events: Vec<PriceEvent>,
    audit: &mut W,
) -> Result<RunSummary, PipelineError> {
    events.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.event_id.cmp(&b.event_id))
    });

    state.refresh_hash()?;
    let mut cache = PriceCache::new();
    let mut prev_timestamp: Option<i64> = None;
    let mut processed = 0u64;
    let mut skipped_duplicates = 0u64;

    for event in &events {
        if let Some(prev) = prev_timestamp {
            if event.timestamp < prev {
                return Err(PipelineError::OutOfOrder {
                    event_id: event.event_id.as_str().to_string(),
                    timestamp: event.timestamp,
                    prev_timestamp: prev,
                });
            }
        }
        prev_timestamp = Some(event.timestamp);

        if state.seen_event_ids.contains(&event.event_id) {
            debug!(event_id = %event.event_id, "duplicate event skipped");
            skipped_duplicates += 1;
            continue;
        }

        cache.observe(event);
        let quotes = cache.quotes(&event.item_id);
        let item = state.items.entry(event.item_id.clone()).or_default();
        let verdict = evaluate(event, item, &quotes);
        let bias_cents_after = item.bias_cents;

        if verdict.decision == Decision::AnomalyRejected {
            warn!(
                event_id = %event.event_id,
                item_id = %event.item_id,
                price_cents = event.price_cents,
                "circuit breaker rejected human price"
            );
        }

        state.seen_event_ids.insert(event.event_id.clone());
        let state_hash_after = state.refresh_hash()?.to_string();

        let record = AuditRecord {
            event_id: event.event_id.clone(),
            item_id: event.item_id.clone(),
            timestamp: event.timestamp,
            source: event.source,
            outcome: event.outcome,
            final_price_cents: verdict.final_price_cents,
            decision: verdict.decision,
            flags: verdict.flags,
            bias_cents_after,
            state_hash_after,
        };
        let bytes = record.to_canon_bytes()?;
        audit.write_all(&bytes).map_err(PipelineError::Audit)?;
        audit.write_all(b"\n").map_err(PipelineError::Audit)?;
        audit.flush().map_err(PipelineError::Audit)?;

        debug!(
            event_id = %event.event_id,
            decision = record.decision.as_str(),
            final_price_cents = record.final_price_cents,
            "event processed"
        );
        processed += 1;
    }

    Ok(RunSummary {
        final_hash: state.state_hash.clone(),
        processed,
        skipped_duplicates,
    })
}

/// The `run` operation: load state, process an events file, persist the
/// snapshot and the audit log, return the final hash.
pub fn run_files(
    events_path: &Path,
    state_path: &Path,
    audit_path: &Path,
) -> crate::Result<String> {
    let mut state = store::load(state_path)?;
    let events = read_events(BufReader::new(File::open(events_path)?))?;

    let mut audit = BufWriter::new(File::create(audit_path)?);
    let summary = process_events(&mut state, events, &mut audit)?;
    store::save(state_path, &mut state)?;

    info!(
        processed = summary.processed,
        skipped_duplicates = summary.skipped_duplicates,
        hash = %summary.final_hash,
        "run complete"
    );
    Ok(summary.final_hash)
}
