mod common;

use combat_core::{
    ActionError, CombatantId, CombatantKind, CombatantTemplate, EffectGrant, Epoch, InvalidReference, Modifier, Phase,
    PlayerAction, PlayerLoadout, PreconditionFailure, ScriptedRolls, Skill, StatKey, TargetType,
    TurnError,
};
use common::*;

const FOE: CombatantId = CombatantId(1);

#[test]
fn equally_fast_player_acts_before_opponent() {
    let mut session = session(ScriptedRolls::new());
    start_against(&mut session, PlayerLoadout::new(hero()), foe("Duelist", 50, 5, 0, 10));

    assert_eq!(
        session.state().turn_order,
        vec![CombatantId::PLAYER, FOE]
    );
    assert!(session.is_player_turn());
    assert_eq!(session.pending_automatic_turn(), None);
}

#[test]
fn downed_companion_never_holds_the_turn() {
    let mut ally = CombatantTemplate::new("Ally", CombatantKind::Companion, 40, 0)
        .with_stats(3, 0, 99);
    ally.hp = Some(0);
    let mut loadout = PlayerLoadout::new(hero());
    loadout.companions.push(ally);

    let mut session = session(ScriptedRolls::new());
    let roster = roster(&[("orc", foe("Orc", 500, 1, 0, 5))]);
    session
        .start(loadout, &refs(&["orc"]), &roster)
        .expect("encounter starts");
    let orc = CombatantId(2);

    assert_eq!(
        session.state().turn_order,
        vec![CombatantId(1), CombatantId::PLAYER, orc]
    );
    assert!(session.is_player_turn());
    assert_eq!(session.pending_automatic_turn(), None);

    session
        .act(PlayerAction::Attack { target: orc })
        .expect("player opens the encounter");
    let steps = session.run_automatic_turns();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].actor, orc);
    assert_eq!(session.state().round_number, 2);
    assert!(session.is_player_turn());
}

#[test]
fn faster_opponent_opens_the_round() {
    let mut session = session(ScriptedRolls::new());
    start_against(&mut session, PlayerLoadout::new(hero()), foe("Wolf", 50, 5, 0, 12));

    let (epoch, actor) = session.pending_automatic_turn().expect("wolf acts first");
    assert_eq!(actor, FOE);
    assert_eq!(epoch, session.epoch());

    let step = session.step_automatic(epoch).expect("wolf turn runs");
    assert_eq!(step.actor, FOE);
    assert_eq!(step.target, Some(CombatantId::PLAYER));
    assert_eq!(step.outcome.map(|o| o.damage), Some(5));
    assert!(session.is_player_turn());
    assert_eq!(session.state().round_number, 1);
    assert_eq!(session.state().player_damage_taken, 5);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut session = session(ScriptedRolls::new());
    start_against(&mut session, PlayerLoadout::new(hero()), foe("Wolf", 50, 5, 0, 12));

    assert_eq!(
        session.act(PlayerAction::Attack { target: FOE }),
        Err(ActionError::NotPlayerTurn { current: FOE })
    );
}

#[test]
fn invalid_references_do_not_consume_the_turn() {
    let mut session = passive_session(ScriptedRolls::new());
    start_against(&mut session, PlayerLoadout::new(hero()), foe("Bandit", 50, 5, 0, 1));
    let log_len = session.state().log.len();

    let cases = [
        (
            PlayerAction::Attack {
                target: CombatantId(99),
            },
            InvalidReference::UnknownTarget(CombatantId(99)),
        ),
        (
            PlayerAction::Attack {
                target: CombatantId::PLAYER,
            },
            InvalidReference::WrongTargetType {
                action: "attack".into(),
                target: CombatantId::PLAYER,
            },
        ),
        (
            PlayerAction::UseSkill {
                skill_id: "meteor".into(),
                target: FOE,
            },
            InvalidReference::UnknownSkill("meteor".into()),
        ),
        (
            PlayerAction::UseItem {
                item_id: "elixir".into(),
                target: CombatantId::PLAYER,
            },
            InvalidReference::UnknownItem("elixir".into()),
        ),
    ];

    for (action, expected) in cases {
        assert_eq!(session.act(action), Err(ActionError::InvalidReference(expected)));
    }
    assert!(session.is_player_turn());
    assert_eq!(session.state().log.len(), log_len);
}

#[test]
fn cooldown_ticks_at_start_of_owner_turn() {
    let slam = Skill {
        cooldown: 2,
        base_damage: 1,
        ..Skill::new("slam", "Slam")
    };
    let mut session = passive_session(ScriptedRolls::new());
    start_against(
        &mut session,
        PlayerLoadout::new(hero().with_skill(slam)),
        foe("Golem", 500, 1, 0, 1),
    );
    let use_slam = || PlayerAction::UseSkill {
        skill_id: "slam".into(),
        target: FOE,
    };
    let cooldown = |s: &combat_core::CombatSession| {
        s.state()
            .player()
            .and_then(|p| p.skill("slam"))
            .map(|sk| sk.current_cooldown)
    };

    session.act(use_slam()).expect("slam ready");
    assert_eq!(cooldown(&session), Some(2));

    // Golem's turn does not touch the player's cooldowns.
    let (epoch, _) = session.pending_automatic_turn().unwrap();
    session.step_automatic(epoch).unwrap();
    // Round 2 player turn has begun: 2 -> 1.
    assert_eq!(cooldown(&session), Some(1));
    assert_eq!(
        session.act(use_slam()),
        Err(ActionError::Precondition(PreconditionFailure::OnCooldown {
            skill_id: "slam".into(),
            remaining: 1,
        }))
    );

    session.act(PlayerAction::Attack { target: FOE }).unwrap();
    session.run_automatic_turns();
    assert_eq!(cooldown(&session), Some(0));
    session.act(use_slam()).expect("slam ready again");
}

#[test]
fn effect_durations_tick_at_end_of_owner_turn() {
    let war_cry = Skill {
        target_type: TargetType::SelfOnly,
        buffs_applied: vec![EffectGrant::new(StatKey::Attack, Modifier::Flat(5), 2)],
        ..Skill::new("war_cry", "War Cry")
    };
    let mut session = passive_session(ScriptedRolls::new());
    start_against(
        &mut session,
        PlayerLoadout::new(hero().with_skill(war_cry)),
        foe("Golem", 500, 1, 0, 1),
    );
    let buff_turns = |s: &combat_core::CombatSession| {
        s.state()
            .player()
            .and_then(|p| p.stats.active_effects.first())
            .map(|e| e.duration_turns)
    };
    let attack = |s: &combat_core::CombatSession| {
        s.state().player().unwrap().stats.effective(StatKey::Attack)
    };

    session
        .act(PlayerAction::UseSkill {
            skill_id: "war_cry".into(),
            target: CombatantId::PLAYER,
        })
        .unwrap();
    // Applied this turn, so the end of this turn does not count.
    assert_eq!(buff_turns(&session), Some(2));
    assert_eq!(attack(&session), 15);
    session.run_automatic_turns();

    session.act(PlayerAction::Attack { target: FOE }).unwrap();
    assert_eq!(buff_turns(&session), Some(1));
    session.run_automatic_turns();
    assert_eq!(attack(&session), 15);

    session.act(PlayerAction::Attack { target: FOE }).unwrap();
    assert_eq!(buff_turns(&session), None);
    assert_eq!(attack(&session), 10);
}

#[test]
fn debuff_on_opponent_ticks_on_its_own_turn() {
    let sunder = Skill {
        base_damage: 1,
        debuffs_applied: vec![EffectGrant::new(StatKey::Defense, Modifier::Flat(-5), 1)],
        ..Skill::new("sunder", "Sunder")
    };
    let mut session = passive_session(ScriptedRolls::new());
    start_against(
        &mut session,
        PlayerLoadout::new(hero().with_skill(sunder)),
        foe("Knight", 200, 1, 20, 1),
    );
    let knight_defense = |s: &combat_core::CombatSession| {
        s.state()
            .combatant(FOE)
            .unwrap()
            .stats
            .effective(StatKey::Defense)
    };

    session
        .act(PlayerAction::UseSkill {
            skill_id: "sunder".into(),
            target: FOE,
        })
        .unwrap();
    assert_eq!(knight_defense(&session), 15);

    session.run_automatic_turns();
    assert_eq!(knight_defense(&session), 20);
}

#[test]
fn round_rollover_regenerates_menu() {
    let mut session = passive_session(ScriptedRolls::new());
    let goblin = foe("Goblin", 10, 1, 0, 1);
    let mut weakling = foe("Weakling", 10, 1, 0, 2);
    weakling.hp = Some(4);
    let roster = roster(&[("goblin", goblin), ("weakling", weakling)]);
    session
        .start(
            PlayerLoadout::new(hero()),
            &refs(&["goblin", "weakling"]),
            &roster,
        )
        .unwrap();

    let attack_entries = |s: &combat_core::CombatSession| {
        s.action_menu()
            .iter()
            .filter(|o| matches!(o, combat_core::ActionOption::Attack { .. }))
            .count()
    };
    assert_eq!(attack_entries(&session), 2);

    session
        .act(PlayerAction::Attack {
            target: CombatantId(2),
        })
        .unwrap();
    // Still round 1: the menu is only rebuilt on rollover.
    assert_eq!(attack_entries(&session), 2);

    let steps = session.run_automatic_turns();
    assert_eq!(steps.len(), 1, "the downed weakling is skipped");
    assert_eq!(session.state().round_number, 2);
    assert_eq!(attack_entries(&session), 1);
}

#[test]
fn stale_epoch_is_rejected_without_mutation() {
    let mut session = session(ScriptedRolls::new());
    start_against(&mut session, PlayerLoadout::new(hero()), foe("Wolf", 50, 5, 0, 12));
    let (old_epoch, _) = session.pending_automatic_turn().unwrap();

    assert!(session.abandon());
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(
        session.step_automatic(old_epoch),
        Err(TurnError::StaleEpoch {
            expected: session.epoch(),
            provided: old_epoch,
        })
    );

    start_against(&mut session, PlayerLoadout::new(hero()), foe("Wolf", 50, 5, 0, 12));
    let snapshot = session.state().clone();
    assert!(matches!(
        session.step_automatic(old_epoch),
        Err(TurnError::StaleEpoch { .. })
    ));
    assert_eq!(session.state(), &snapshot);
    assert!(session.epoch() > old_epoch);
    assert_ne!(session.epoch(), Epoch::ZERO);
}

#[test]
fn stepping_on_the_player_turn_is_rejected() {
    let mut session = session(ScriptedRolls::new());
    start_against(&mut session, PlayerLoadout::new(hero()), foe("Snail", 50, 5, 0, 1));
    assert_eq!(
        session.step_automatic(session.epoch()),
        Err(TurnError::PlayerTurn)
    );
}
