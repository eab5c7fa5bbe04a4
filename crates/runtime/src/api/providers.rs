//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or test policies.
use async_trait::async_trait;
use combat_core::{ActionOption, CombatantSnapshot, Disposition, PlayerAction};

use super::errors::Result;
use super::view::EncounterView;

/// Trait for providing the player's actions.
///
/// Different implementations can handle:
/// - Player input (from a UI)
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the player's action for the current turn.
    ///
    /// # Arguments
    /// * `view` - Snapshot taken at the start of the player's turn, menu included
    ///
    /// # Returns
    /// The action to perform, or an error if none can be determined
    async fn provide_action(&self, view: &EncounterView) -> Result<PlayerAction>;

    /// Pick the fate of a defeated opponent once the encounter has ended.
    ///
    /// `None` keeps the default ([`Disposition::Kill`]).
    async fn choose_disposition(&self, _opponent: &CombatantSnapshot) -> Option<Disposition> {
        None
    }
}

/// Attacks the first living opponent in the menu, surrendering when there is
/// nothing to attack.
/// Useful for testing or as a fallback.
pub struct AttackFirstProvider;

#[async_trait]
impl ActionProvider for AttackFirstProvider {
    async fn provide_action(&self, view: &EncounterView) -> Result<PlayerAction> {
        let target = view.menu().iter().find_map(|option| match option {
            ActionOption::Attack { target, .. } => view
                .state
                .combatant(*target)
                .filter(|c| c.is_alive())
                .map(|c| c.id),
            _ => None,
        });
        Ok(match target {
            Some(target) => PlayerAction::Attack { target },
            None => PlayerAction::Surrender,
        })
    }
}
