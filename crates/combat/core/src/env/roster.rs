use std::collections::HashMap;
use std::fmt;

use crate::state::CombatantTemplate;

/// Reference to an opponent definition held by the external content store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OpponentRef(pub String);

impl OpponentRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OpponentRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OpponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves opponent references into combatant templates.
///
/// Returning `None` marks the reference as unresolvable; the session skips it
/// and rejects the encounter only when nothing resolves.
pub trait RosterOracle {
    fn opponent(&self, reference: &OpponentRef) -> Option<CombatantTemplate>;
}

/// In-memory roster keyed by reference string.
impl RosterOracle for HashMap<String, CombatantTemplate> {
    fn opponent(&self, reference: &OpponentRef) -> Option<CombatantTemplate> {
        self.get(reference.as_str()).cloned()
    }
}
