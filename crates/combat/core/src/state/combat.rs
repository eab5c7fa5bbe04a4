use super::types::{
    ActionOption, CombatLogEntry, Combatant, CombatantId, Inventory, Side,
};

/// Everything an active encounter tracks.
///
/// `turn_order` is fixed when the encounter starts. `turn_serial` increments
/// every time a combatant's turn begins and stamps status effects so duration
/// ticking can tell which turn they arrived on.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub combatants: Vec<Combatant>,
    pub turn_order: Vec<CombatantId>,
    pub current_turn_index: usize,
    pub round_number: u32,
    pub player_damage_dealt: u64,
    pub player_damage_taken: u64,
    pub notable_events: Vec<String>,
    pub flee_attempts: u32,
    pub killing_blow_by: Option<CombatantId>,
    pub action_menu: Vec<ActionOption>,
    pub inventory: Inventory,
    pub turn_serial: u64,
    pub log: Vec<CombatLogEntry>,
}

impl CombatState {
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combatant(CombatantId::PLAYER)
    }

    pub fn current_actor_id(&self) -> Option<CombatantId> {
        self.turn_order.get(self.current_turn_index).copied()
    }

    pub fn current_actor(&self) -> Option<&Combatant> {
        self.current_actor_id().and_then(|id| self.combatant(id))
    }

    pub fn opponents(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants
            .iter()
            .filter(|c| c.side() == Side::Opponent)
    }

    pub fn living_opponents(&self) -> impl Iterator<Item = &Combatant> {
        self.opponents().filter(|c| c.is_alive())
    }

    pub fn all_opponents_down(&self) -> bool {
        self.living_opponents().next().is_none()
    }

    pub fn all_player_side_down(&self) -> bool {
        !self
            .combatants
            .iter()
            .any(|c| c.side() == Side::Player && c.is_alive())
    }

    /// Combatants in turn order.
    pub fn in_turn_order(&self) -> impl Iterator<Item = &Combatant> {
        self.turn_order.iter().filter_map(|id| self.combatant(*id))
    }
}
