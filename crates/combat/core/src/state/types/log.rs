use super::common::CombatantId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LogKind {
    /// Narration that did not change state (failed precondition, round change).
    Info,
    /// A resolved action.
    Action,
}

/// One entry of the structured combat log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub kind: LogKind,
    pub actor_id: Option<CombatantId>,
    pub actor_name: Option<String>,
    pub target_id: Option<CombatantId>,
    pub target_name: Option<String>,
    pub action_name: Option<String>,
    pub damage: Option<u32>,
    pub healing: Option<u32>,
    pub did_crit: Option<bool>,
    pub did_evade: Option<bool>,
    pub final_target_hp: Option<u32>,
    pub max_target_hp: Option<u32>,
    pub message: String,
}

impl CombatLogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Info,
            actor_id: None,
            actor_name: None,
            target_id: None,
            target_name: None,
            action_name: None,
            damage: None,
            healing: None,
            did_crit: None,
            did_evade: None,
            final_target_hp: None,
            max_target_hp: None,
            message: message.into(),
        }
    }

    pub fn is_action(&self) -> bool {
        self.kind == LogKind::Action
    }
}
