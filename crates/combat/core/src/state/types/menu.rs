use super::common::CombatantId;

/// An action the player may pick this round.
///
/// Regenerated at encounter start and on every round rollover.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOption {
    Attack {
        target: CombatantId,
        target_name: String,
    },
    UseSkill {
        skill_id: String,
        name: String,
        ready: bool,
        affordable: bool,
    },
    UseItem {
        item_id: String,
        name: String,
        quantity: u32,
    },
    Flee,
    Surrender,
}
