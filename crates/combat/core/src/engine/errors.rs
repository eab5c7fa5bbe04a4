//! Error types for the combat session state machine.

use crate::error::{CombatFailure, ErrorSeverity};
use crate::state::{CombatantId, Epoch};

/// Why an encounter could not be started.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("an encounter is already in progress")]
    AlreadyActive,

    #[error("none of the requested opponents could be resolved")]
    NoOpponents,

    #[error("the player cannot enter combat with 0 HP")]
    PlayerDown,
}

impl CombatFailure for StartError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyActive => ErrorSeverity::Internal,
            Self::NoOpponents | Self::PlayerDown => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyActive => "START_ALREADY_ACTIVE",
            Self::NoOpponents => "START_NO_OPPONENTS",
            Self::PlayerDown => "START_PLAYER_DOWN",
        }
    }
}

/// A reference in a player action that does not point at anything usable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReference {
    #[error("unknown target {0}")]
    UnknownTarget(CombatantId),

    #[error("target {0} is already down")]
    TargetDown(CombatantId),

    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("item '{0}' is not in the inventory")]
    UnknownItem(String),

    #[error("{target} is not a valid target for '{action}'")]
    WrongTargetType { action: String, target: CombatantId },
}

/// A valid action the actor cannot afford right now.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionFailure {
    #[error("skill '{skill_id}' is on cooldown for {remaining} more turn(s)")]
    OnCooldown { skill_id: String, remaining: u32 },

    #[error("skill '{skill_id}' needs {required} MP, {available} available")]
    InsufficientMana {
        skill_id: String,
        required: u32,
        available: u32,
    },
}

/// Why a player action was rejected. The turn is never consumed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("no encounter is active")]
    NotActive,

    #[error("it is not the player's turn (current actor {current})")]
    NotPlayerTurn { current: CombatantId },

    #[error(transparent)]
    InvalidReference(#[from] InvalidReference),

    #[error(transparent)]
    Precondition(#[from] PreconditionFailure),
}

impl CombatFailure for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotActive | Self::NotPlayerTurn { .. } => ErrorSeverity::Internal,
            Self::InvalidReference(_) => ErrorSeverity::Validation,
            Self::Precondition(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotActive => "ACTION_NOT_ACTIVE",
            Self::NotPlayerTurn { .. } => "ACTION_NOT_PLAYER_TURN",
            Self::InvalidReference(InvalidReference::UnknownTarget(_)) => "ACTION_UNKNOWN_TARGET",
            Self::InvalidReference(InvalidReference::TargetDown(_)) => "ACTION_TARGET_DOWN",
            Self::InvalidReference(InvalidReference::UnknownSkill(_)) => "ACTION_UNKNOWN_SKILL",
            Self::InvalidReference(InvalidReference::UnknownItem(_)) => "ACTION_UNKNOWN_ITEM",
            Self::InvalidReference(InvalidReference::WrongTargetType { .. }) => {
                "ACTION_WRONG_TARGET_TYPE"
            }
            Self::Precondition(PreconditionFailure::OnCooldown { .. }) => "ACTION_ON_COOLDOWN",
            Self::Precondition(PreconditionFailure::InsufficientMana { .. }) => {
                "ACTION_INSUFFICIENT_MANA"
            }
        }
    }
}

/// Why an automatic turn could not be stepped.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no encounter is active")]
    NotActive,

    #[error("stale continuation: scheduled under {provided}, session is at {expected}")]
    StaleEpoch { expected: Epoch, provided: Epoch },

    #[error("the player is the current actor")]
    PlayerTurn,
}

impl CombatFailure for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StaleEpoch { .. } => ErrorSeverity::Recoverable,
            Self::NotActive | Self::PlayerTurn => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotActive => "TURN_NOT_ACTIVE",
            Self::StaleEpoch { .. } => "TURN_STALE_EPOCH",
            Self::PlayerTurn => "TURN_PLAYER_TURN",
        }
    }
}

/// Why dispositions or finalization were rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FinalizeError {
    #[error("the encounter has not ended")]
    NotEnded,

    #[error("{0} is not a defeated opponent")]
    NotDefeatedOpponent(CombatantId),
}

impl CombatFailure for FinalizeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnded => ErrorSeverity::Internal,
            Self::NotDefeatedOpponent(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnded => "FINALIZE_NOT_ENDED",
            Self::NotDefeatedOpponent(_) => "FINALIZE_NOT_DEFEATED_OPPONENT",
        }
    }
}

/// Any error the session can report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("start failed: {0}")]
    Start(#[from] StartError),

    #[error("action rejected: {0}")]
    Action(#[from] ActionError),

    #[error("automatic turn failed: {0}")]
    Turn(#[from] TurnError),

    #[error("finalize failed: {0}")]
    Finalize(#[from] FinalizeError),
}

impl CombatFailure for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Start(e) => e.severity(),
            Self::Action(e) => e.severity(),
            Self::Turn(e) => e.severity(),
            Self::Finalize(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Start(e) => e.error_code(),
            Self::Action(e) => e.error_code(),
            Self::Turn(e) => e.error_code(),
            Self::Finalize(e) => e.error_code(),
        }
    }
}

impl From<InvalidReference> for CombatError {
    fn from(error: InvalidReference) -> Self {
        Self::Action(error.into())
    }
}

impl From<PreconditionFailure> for CombatError {
    fn from(error: PreconditionFailure) -> Self {
        Self::Action(error.into())
    }
}
