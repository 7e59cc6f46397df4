use thiserror::Error;

use crate::core::{CanonJsonError, EventError};
use crate::pipeline::PipelineError;
use crate::replay::ReplayError;
use crate::store::StoreError;

/// Crate-level convenience error: a thin wrapper over the capability errors,
/// not a god error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Canon(#[from] CanonJsonError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
