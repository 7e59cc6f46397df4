//! Replay verifier: re-run a log from nothing and compare fingerprints.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::core::EngineState;
use crate::pipeline::{process_events, read_events, PipelineError};
use crate::store::{self, StoreError};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("REPLAY_MISMATCH: expected {expected}, actual {actual}")]
    Mismatch { expected: String, actual: String },
    #[error("failed to read expected hash from {path}: {source}")]
    VerifyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Run the pipeline from an empty state, write the snapshot and audit log to
/// the given paths, and fail unless the final hash equals the content of
/// `verify_path` (surrounding whitespace stripped).
pub fn replay_files(
    events_path: &Path,
    state_path: &Path,
    audit_path: &Path,
    verify_path: &Path,
) -> Result<String, ReplayError> {
    let expected = fs::read_to_string(verify_path)
        .map_err(|source| ReplayError::VerifyFile {
            path: verify_path.display().to_string(),
            source,
        })?
        .trim()
        .to_string();

    let mut state = EngineState::default();
    let events = read_events(BufReader::new(File::open(events_path)?))?;

    let mut audit = BufWriter::new(File::create(audit_path)?);
    let summary = process_events(&mut state, events, &mut audit)?;
    store::save(state_path, &mut state)?;

    if summary.final_hash != expected {
        error!(expected = %expected, actual = %summary.final_hash, "replay diverged");
        return Err(ReplayError::Mismatch {
            expected,
            actual: summary.final_hash,
        });
    }

    info!(hash = %summary.final_hash, processed = summary.processed, "replay verified");
    Ok(summary.final_hash)
}
