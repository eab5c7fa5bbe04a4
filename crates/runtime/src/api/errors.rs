//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat session, worker coordination and the
//! knowledge store so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use combat_core::{
    ActionError, CombatError, CombatFailure, ErrorSeverity, FinalizeError, StartError,
};

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("knowledge store failed")]
    Store(#[from] StoreError),

    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("runtime requires a roster before building")]
    MissingRoster,

    #[error("runtime requires a knowledge store before building")]
    MissingStore,

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("event stream closed before the encounter ended")]
    EventStreamClosed,

    #[error("encounter was abandoned or replaced while running")]
    EncounterAbandoned,
}

impl RuntimeError {
    /// Severity of the underlying failure; transport failures are internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Combat(error) => error.severity(),
            _ => ErrorSeverity::Internal,
        }
    }
}

impl From<StartError> for RuntimeError {
    fn from(error: StartError) -> Self {
        RuntimeError::Combat(error.into())
    }
}

impl From<ActionError> for RuntimeError {
    fn from(error: ActionError) -> Self {
        RuntimeError::Combat(error.into())
    }
}

impl From<FinalizeError> for RuntimeError {
    fn from(error: FinalizeError) -> Self {
        RuntimeError::Combat(error.into())
    }
}
