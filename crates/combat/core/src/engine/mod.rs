//! Encounter state machine.
//!
//! [`CombatSession`] is the only place combat state mutates. It walks the
//! phases
//!
//! ```text
//! Idle ──start──▶ Active ──(resolve + apply)──▶ Active | Ended(outcome)
//!   ▲                                                     │
//!   └──────────────────────finalize / abandon─────────────┘
//! ```
//!
//! Resolution happens inside a single `&mut self` call, so there is no
//! observable "resolving" phase: callers only ever see `Active` or `Ended`.
//!
//! Every player action goes through validate → resolve → apply. Validation
//! failures return an error before anything is touched.

mod apply;
mod errors;
mod finalize;
mod menu;
mod player;
mod policy;
mod turns;

pub use errors::{
    ActionError, CombatError, FinalizeError, InvalidReference, PreconditionFailure, StartError,
    TurnError,
};
pub use policy::{AutomaticAction, BasicAttackPolicy, OpponentPolicy};
pub use turns::{TieBreak, compute_turn_order};

use crate::action::{ActionOutcome, RollSource, SeededRolls};
use crate::config::CombatTables;
use crate::env::{OpponentRef, RosterOracle};
use crate::state::{
    ActionOption, CombatLogEntry, CombatState, Combatant, CombatantId, CombatantKind,
    EncounterOutcome, Epoch, PlayerLoadout,
};

/// Lifecycle phase of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    Active,
    Ended(EncounterOutcome),
}

impl Phase {
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Active)
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        match self {
            Phase::Ended(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// A request from the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Attack { target: CombatantId },
    UseSkill { skill_id: String, target: CombatantId },
    UseItem { item_id: String, target: CombatantId },
    Flee,
    Surrender,
}

/// What a successful player action did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    /// Resolved outcome for attacks and skills.
    pub outcome: Option<ActionOutcome>,
    pub turn_consumed: bool,
    pub phase: Phase,
}

/// What one automatic turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutomaticStep {
    pub actor: CombatantId,
    pub target: Option<CombatantId>,
    /// `None` when the actor passed.
    pub outcome: Option<ActionOutcome>,
    pub phase: Phase,
}

/// Owned combat session. One per encounter host; no global state.
pub struct CombatSession {
    tables: CombatTables,
    rolls: Box<dyn RollSource + Send>,
    policy: Box<dyn OpponentPolicy>,
    tie_break: TieBreak,
    nonce: u64,
    epoch: Epoch,
    phase: Phase,
    state: CombatState,
    log_cursor: usize,
}

impl std::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("epoch", &self.epoch)
            .field("phase", &self.phase)
            .field("nonce", &self.nonce)
            .field("round", &self.state.round_number)
            .finish_non_exhaustive()
    }
}

impl Default for CombatSession {
    fn default() -> Self {
        CombatSessionBuilder::new().build()
    }
}

impl CombatSession {
    pub fn builder() -> CombatSessionBuilder {
        CombatSessionBuilder::new()
    }

    pub fn tables(&self) -> &CombatTables {
        &self.tables
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn current_actor(&self) -> Option<&Combatant> {
        if self.phase == Phase::Idle {
            return None;
        }
        self.state.current_actor()
    }

    pub fn is_player_turn(&self) -> bool {
        self.is_active() && self.state.current_actor_id() == Some(CombatantId::PLAYER)
    }

    pub fn action_menu(&self) -> &[ActionOption] {
        &self.state.action_menu
    }

    /// Log entries recorded since the previous drain.
    pub fn drain_log(&mut self) -> Vec<CombatLogEntry> {
        let fresh = self.state.log[self.log_cursor.min(self.state.log.len())..].to_vec();
        self.log_cursor = self.state.log.len();
        fresh
    }

    /// Begin an encounter.
    ///
    /// Unresolvable references and opponents that would enter with 0 HP are
    /// skipped. Combatants join as player, companions, then opponents in the
    /// order requested; that join order breaks speed ties.
    pub fn start(
        &mut self,
        loadout: PlayerLoadout,
        opponents: &[OpponentRef],
        roster: &(impl RosterOracle + ?Sized),
    ) -> Result<Epoch, StartError> {
        if self.phase != Phase::Idle {
            return Err(StartError::AlreadyActive);
        }

        let resolved: Vec<_> = opponents
            .iter()
            .filter_map(|reference| roster.opponent(reference).map(|t| (reference, t)))
            .filter(|(_, template)| template.hp.unwrap_or(template.max_hp) > 0)
            .collect();
        if resolved.is_empty() {
            return Err(StartError::NoOpponents);
        }
        if loadout.player.hp.unwrap_or(loadout.player.max_hp) == 0 {
            return Err(StartError::PlayerDown);
        }

        let mut combatants = Vec::with_capacity(1 + loadout.companions.len() + resolved.len());

        let mut player = Combatant::from_template(
            CombatantId::PLAYER,
            0,
            &loadout.player,
            None,
            &self.tables,
        );
        player.kind = CombatantKind::Player;
        player.is_player = true;
        combatants.push(player);

        for template in &loadout.companions {
            let join_index = combatants.len();
            let mut companion = Combatant::from_template(
                CombatantId(join_index as u32),
                join_index,
                template,
                None,
                &self.tables,
            );
            companion.kind = CombatantKind::Companion;
            companion.is_player = false;
            combatants.push(companion);
        }

        for (reference, template) in &resolved {
            let join_index = combatants.len();
            let mut opponent = Combatant::from_template(
                CombatantId(join_index as u32),
                join_index,
                template,
                Some(reference.to_string()),
                &self.tables,
            );
            if opponent.kind.is_player_side() {
                opponent.kind = CombatantKind::Npc;
            }
            opponent.is_player = false;
            combatants.push(opponent);
        }

        let opponent_names: Vec<&str> = resolved.iter().map(|(_, t)| t.name.as_str()).collect();
        let opening = format!(
            "Combat begins: {} vs {}.",
            loadout.player.name,
            opponent_names.join(", ")
        );

        let turn_order = compute_turn_order(&combatants, self.tie_break);
        self.state = CombatState {
            combatants,
            turn_order,
            current_turn_index: 0,
            round_number: 1,
            inventory: loadout.inventory,
            ..CombatState::default()
        };
        self.log_cursor = 0;
        self.epoch = self.epoch.next();
        self.phase = Phase::Active;

        self.state.log.push(CombatLogEntry::info(opening));
        self.seek_first_living();
        self.refresh_menu();
        self.begin_turn();

        Ok(self.epoch)
    }

    /// Drop the encounter without a payload.
    ///
    /// Returns false when there was nothing to abandon.
    pub fn abandon(&mut self) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.state = CombatState::default();
        self.phase = Phase::Idle;
        self.log_cursor = 0;
        self.epoch = self.epoch.next();
    }

    /// Advance the nonce and reseed the roll source for the next action.
    fn begin_action(&mut self, actor: CombatantId) {
        self.rolls.begin_action(self.nonce, actor);
        self.nonce = self.nonce.wrapping_add(1);
    }
}

/// Builder for [`CombatSession`].
pub struct CombatSessionBuilder {
    tables: CombatTables,
    seed: u64,
    rolls: Option<Box<dyn RollSource + Send>>,
    policy: Box<dyn OpponentPolicy>,
    tie_break: TieBreak,
}

impl Default for CombatSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatSessionBuilder {
    pub fn new() -> Self {
        Self {
            tables: CombatTables::default(),
            seed: 0,
            rolls: None,
            policy: Box::new(BasicAttackPolicy),
            tie_break: TieBreak::default(),
        }
    }

    pub fn tables(mut self, tables: CombatTables) -> Self {
        self.tables = tables;
        self
    }

    /// Game seed for the default seeded roll source.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the seeded roll source, e.g. with scripted rolls.
    pub fn rolls(mut self, rolls: impl RollSource + Send + 'static) -> Self {
        self.rolls = Some(Box::new(rolls));
        self
    }

    pub fn policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn build(self) -> CombatSession {
        let rolls = self
            .rolls
            .unwrap_or_else(|| Box::new(SeededRolls::new(self.seed)));
        CombatSession {
            tables: self.tables,
            rolls,
            policy: self.policy,
            tie_break: self.tie_break,
            nonce: 0,
            epoch: Epoch::ZERO,
            phase: Phase::Idle,
            state: CombatState::default(),
            log_cursor: 0,
        }
    }
}
