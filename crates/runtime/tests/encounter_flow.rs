//! Runtime-level encounter flows with zero pacing delay.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use combat_core::{
    CombatantId, CombatantKind, CombatantSnapshot, CombatantTemplate, Disposition,
    EncounterOutcome, ErrorSeverity, OpponentRef, Phase, PlayerAction, PlayerLoadout,
    ScriptedRolls, Skill,
};
use runtime::{
    ActionProvider, AttackFirstProvider, EncounterEvent, EncounterView, Event,
    InMemoryKnowledgeStore, KnowledgeStore, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle,
    Topic,
};

fn hero() -> CombatantTemplate {
    CombatantTemplate::new("Hero", CombatantKind::Player, 100, 50).with_stats(10, 0, 10)
}

fn foe(name: &str, hp: u32, attack: i32, speed: i32) -> CombatantTemplate {
    CombatantTemplate::new(name, CombatantKind::Npc, hp, 0).with_stats(attack, 0, speed)
}

fn roster(entries: &[(&str, CombatantTemplate)]) -> HashMap<String, CombatantTemplate> {
    entries
        .iter()
        .map(|(key, template)| (key.to_string(), template.clone()))
        .collect()
}

fn config(delay: Duration) -> RuntimeConfig {
    RuntimeConfig::default()
        .with_npc_turn_delay(delay)
        .with_seed(7)
}

fn build(
    store: Arc<InMemoryKnowledgeStore>,
    opponents: HashMap<String, CombatantTemplate>,
    delay: Duration,
) -> Runtime {
    Runtime::builder()
        .config(config(delay))
        .roster(opponents)
        .store(store)
        .rolls(ScriptedRolls::new())
        .build()
        .expect("runtime builds")
}

async fn wait_for_player_turn(handle: &RuntimeHandle) -> EncounterView {
    for _ in 0..500 {
        let view = handle.query().await.expect("query");
        if view.is_player_turn() || view.phase.outcome().is_some() {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("player turn never arrived");
}

struct CapturingProvider;

#[async_trait]
impl ActionProvider for CapturingProvider {
    async fn provide_action(&self, view: &EncounterView) -> runtime::Result<PlayerAction> {
        AttackFirstProvider.provide_action(view).await
    }

    async fn choose_disposition(&self, _opponent: &CombatantSnapshot) -> Option<Disposition> {
        Some(Disposition::Capture)
    }
}

#[tokio::test]
async fn run_encounter_reaches_victory_and_syncs_the_store() {
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(hero())));
    let mut runtime = build(
        store.clone(),
        roster(&[("rat", foe("Rat", 25, 4, 5))]),
        Duration::ZERO,
    );
    runtime.set_player_provider(AttackFirstProvider);

    let payload = runtime
        .run_encounter(vec![OpponentRef::from("rat")])
        .await
        .unwrap();

    // 10 damage per hit, rat hits back for 4 between player turns.
    assert_eq!(payload.outcome, EncounterOutcome::Victory);
    assert_eq!(payload.damage_dealt_by_player, 25);
    assert_eq!(payload.damage_taken_by_player, 8);
    assert_eq!(payload.killing_blow_by, Some(CombatantId::PLAYER));
    assert_eq!(payload.disposition(CombatantId(1)), Some(Disposition::Kill));
    assert_eq!(store.load_player().unwrap().player.hp, Some(92));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn provider_dispositions_reach_the_payload() {
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(hero())));
    let mut runtime = build(
        store,
        roster(&[("rat", foe("Rat", 10, 1, 1))]),
        Duration::ZERO,
    );
    runtime.set_player_provider(CapturingProvider);

    let payload = runtime
        .run_encounter(vec![OpponentRef::from("rat")])
        .await
        .unwrap();
    assert_eq!(payload.disposition(CombatantId(1)), Some(Disposition::Capture));
}

#[tokio::test]
async fn faster_opponent_acts_before_the_first_player_turn() {
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(hero())));
    let runtime = build(
        store,
        roster(&[("wolf", foe("Wolf", 40, 6, 20))]),
        Duration::ZERO,
    );
    let handle = runtime.handle();
    let mut log = handle.subscribe(Topic::Log);

    handle
        .start_encounter(vec![OpponentRef::from("wolf")])
        .await
        .unwrap();
    let view = wait_for_player_turn(&handle).await;

    assert_eq!(view.state.player().map(|p| p.stats.hp), Some(94));
    let mut saw_wolf_attack = false;
    while let Ok(Event::Log(event)) = log.try_recv() {
        if event.entry.actor_name.as_deref() == Some("Wolf") {
            saw_wolf_attack = true;
        }
    }
    assert!(saw_wolf_attack);
}

#[tokio::test]
async fn abandoned_continuations_are_discarded() {
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(hero())));
    let runtime = build(
        store,
        roster(&[("wolf", foe("Wolf", 40, 6, 20))]),
        Duration::from_millis(40),
    );
    let handle = runtime.handle();

    let first = handle
        .start_encounter(vec![OpponentRef::from("wolf")])
        .await
        .unwrap();
    assert!(handle.abandon().await.unwrap());
    let second = handle
        .start_encounter(vec![OpponentRef::from("wolf")])
        .await
        .unwrap();
    assert!(second > first);

    let view = wait_for_player_turn(&handle).await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    let later = handle.query().await.unwrap();

    // Exactly one wolf attack: the first encounter's continuation never lands.
    assert_eq!(view.state.player().map(|p| p.stats.hp), Some(94));
    assert_eq!(later.state.player().map(|p| p.stats.hp), Some(94));
    assert!(later.is_player_turn());
}

#[tokio::test]
async fn rejected_actions_keep_the_turn() {
    let mut tired = hero();
    tired.mp = Some(0);
    tired.skills.push(Skill {
        mana_cost: 10,
        base_damage: 5,
        damage_multiplier: 1.0,
        ..Skill::new("bolt", "Bolt")
    });
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(tired)));
    let runtime = build(
        store,
        roster(&[("rat", foe("Rat", 30, 1, 1))]),
        Duration::ZERO,
    );
    let handle = runtime.handle();
    let mut log = handle.subscribe(Topic::Log);

    handle
        .start_encounter(vec![OpponentRef::from("rat")])
        .await
        .unwrap();
    let error = handle
        .perform(PlayerAction::UseSkill {
            skill_id: "bolt".into(),
            target: CombatantId(1),
        })
        .await
        .unwrap_err();

    assert_eq!(error.severity(), ErrorSeverity::Recoverable);
    assert!(handle.query().await.unwrap().is_player_turn());

    let mut messages = Vec::new();
    while let Ok(Event::Log(event)) = log.try_recv() {
        messages.push(event.entry.message);
    }
    assert!(messages.iter().any(|m| m.contains("needs 10 MP")));
}

#[tokio::test]
async fn finalize_requires_an_ended_encounter() {
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(hero())));
    let runtime = build(
        store,
        roster(&[("rat", foe("Rat", 30, 1, 1))]),
        Duration::ZERO,
    );
    let handle = runtime.handle();
    let mut encounters = handle.subscribe(Topic::Encounter);

    handle
        .start_encounter(vec![OpponentRef::from("rat")])
        .await
        .unwrap();
    assert!(matches!(
        handle.finalize().await,
        Err(RuntimeError::Combat(_))
    ));

    handle.perform(PlayerAction::Surrender).await.unwrap();
    let payload = handle.finalize().await.unwrap();
    assert_eq!(payload.outcome, EncounterOutcome::Surrendered);
    assert_eq!(handle.query().await.unwrap().phase, Phase::Idle);

    let mut kinds = Vec::new();
    while let Ok(Event::Encounter(event)) = encounters.try_recv() {
        kinds.push(match event {
            EncounterEvent::Started { .. } => "started",
            EncounterEvent::Ended { .. } => "ended",
            EncounterEvent::Finalized { .. } => "finalized",
            EncounterEvent::Abandoned { .. } => "abandoned",
        });
    }
    assert_eq!(kinds, vec!["started", "ended", "finalized"]);
}

#[tokio::test]
async fn unresolvable_opponents_are_rejected() {
    let store = Arc::new(InMemoryKnowledgeStore::with_loadout(PlayerLoadout::new(hero())));
    let runtime = build(store, roster(&[]), Duration::ZERO);

    let error = runtime
        .handle()
        .start_encounter(vec![OpponentRef::from("ghost")])
        .await
        .unwrap_err();
    assert_eq!(error.severity(), ErrorSeverity::Validation);
}

#[tokio::test]
async fn empty_store_fails_the_start() {
    let runtime = build(
        Arc::new(InMemoryKnowledgeStore::new()),
        roster(&[("rat", foe("Rat", 30, 1, 1))]),
        Duration::ZERO,
    );
    let error = runtime
        .handle()
        .start_encounter(vec![OpponentRef::from("rat")])
        .await
        .unwrap_err();
    assert!(matches!(error, RuntimeError::Store(_)));
}

#[tokio::test]
async fn builder_requires_roster_and_store() {
    let missing_roster = Runtime::builder()
        .store(Arc::new(InMemoryKnowledgeStore::new()))
        .build();
    assert!(matches!(missing_roster, Err(RuntimeError::MissingRoster)));

    let missing_store = Runtime::builder()
        .roster(roster(&[]))
        .build();
    assert!(matches!(missing_store, Err(RuntimeError::MissingStore)));
}
