//! State store: load and save `rules_state.json`.
//!
//! Saves go to a temporary sibling, fsync, then rename into place; a partial
//! snapshot is never visible. Loads verify the embedded fingerprint and
//! surface STATE_CORRUPT rather than repairing anything.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::{CanonJsonError, EngineState, to_canon_json_bytes};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "STATE_CORRUPT: {}: embedded hash {embedded} does not match computed {computed}",
        .path.display()
    )]
    Corrupt {
        path: PathBuf,
        embedded: String,
        computed: String,
    },
    #[error("state file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("state file {} is not valid state JSON: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Canon(#[from] CanonJsonError),
}

/// Load state from disk; an absent file yields a fresh empty state with its
/// hash already computed.
pub fn load(path: &Path) -> Result<EngineState, StoreError> {
    if !path.exists() {
        let mut state = EngineState::default();
        state.refresh_hash()?;
        debug!(path = %path.display(), "state file absent, starting empty");
        return Ok(state);
    }

    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let state: EngineState = serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let computed = state.fingerprint()?;
    if state.state_hash != computed {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            embedded: state.state_hash,
            computed,
        });
    }

    debug!(path = %path.display(), items = state.items.len(), "state loaded");
    Ok(state)
}

/// Refresh the hash and persist the canonical snapshot atomically, returning
/// the final hash.
pub fn save(path: &Path, state: &mut EngineState) -> Result<String, StoreError> {
    state.refresh_hash()?;
    let bytes = to_canon_json_bytes(state)?;

    let tmp_path = tmp_sibling(path);
    write_and_sync(&tmp_path, &bytes).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // fsync the directory so the rename itself is durable
    #[cfg(unix)]
    {
        if let Some(dir) = path.parent() {
            if let Ok(dir) = File::open(dir) {
                let _ = dir.sync_all();
            }
        }
    }

    info!(path = %path.display(), hash = %state.state_hash, "state saved");
    Ok(state.state_hash.clone())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
