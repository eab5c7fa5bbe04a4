//! Loading content directories end to end.

use std::fs;
use std::path::{Path, PathBuf};

use combat_content::ContentFactory;
use combat_core::{
    CombatSession, CombatantKind, ItemEffect, Modifier, OpponentRef, Phase, RosterOracle,
    ScriptedRolls, StatKey,
};
use tempfile::TempDir;

fn shipped_data() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn minimal_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "skills.ron",
        r#"(skills: [(id: "jab", name: "Jab", base_damage: 3, damage_multiplier: 1.0)])"#,
    );
    write(
        dir.path(),
        "items.ron",
        r#"(items: [(id: "salve", name: "Salve", effect_text: Some("Hồi phục 10 máu"))])"#,
    );
    write(
        dir.path(),
        "roster.ron",
        r#"(combatants: {"rat": (name: "Rat", kind: beast, max_hp: 6, attack: 2, speed: 3)})"#,
    );
    write(
        dir.path(),
        "player.ron",
        r#"(
            player: (name: "Ana", kind: player, max_hp: 40, attack: 6, speed: 8, skills: ["jab"]),
            inventory: [(item: "salve")],
        )"#,
    );
    dir
}

#[test]
fn shipped_content_loads() {
    let content = ContentFactory::new(shipped_data()).load_all().unwrap();

    assert!(content.skills.contains_key("power_strike"));
    assert_eq!(content.loadout.player.name, "Hero");
    assert_eq!(content.loadout.companions.len(), 1);
    assert!(content.roster.get("wolf").is_some());

    let war_paint = &content.items["war_paint"];
    assert_eq!(war_paint.effects.len(), 1);
    let ItemEffect::Grant(grant) = war_paint.effects[0] else {
        panic!("war paint should grant a buff");
    };
    assert_eq!(grant.stat, StatKey::Attack);
    assert_eq!(grant.amount, Modifier::Flat(5));
    assert_eq!(grant.duration_turns, 2);
}

#[test]
fn missing_tables_fall_back_to_defaults() {
    let dir = minimal_dir();
    let content = ContentFactory::new(dir.path()).load_all().unwrap();

    assert_eq!(content.tables, combat_core::CombatTables::default());
    assert_eq!(
        content.items["salve"].effects,
        vec![ItemEffect::RestoreHp(10)]
    );
    assert_eq!(content.loadout.inventory.items[0].quantity, 1);
}

#[test]
fn tables_override_only_named_keys() {
    let dir = minimal_dir();
    write(dir.path(), "tables.toml", "[damage]\nminimum = 2\n");

    let tables = ContentFactory::new(dir.path()).load_tables().unwrap();
    assert_eq!(tables.damage.minimum, 2);
    assert_eq!(tables.hit, combat_core::CombatTables::default().hit);
}

#[test]
fn missing_required_file_is_reported_with_its_path() {
    let dir = minimal_dir();
    fs::remove_file(dir.path().join("roster.ron")).unwrap();

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
    assert!(err.to_string().contains("roster.ron"));
}

#[test]
fn malformed_ron_is_an_error() {
    let dir = minimal_dir();
    write(dir.path(), "skills.ron", "(skills: [(id: ");

    assert!(ContentFactory::new(dir.path()).load_skills().is_err());
}

#[test]
fn loaded_content_drives_an_encounter() {
    let dir = minimal_dir();
    let content = ContentFactory::new(dir.path()).load_all().unwrap();

    let rat = content.roster.opponent(&OpponentRef::from("rat")).unwrap();
    assert_eq!(rat.kind, CombatantKind::Beast);

    let mut session = CombatSession::builder()
        .tables(content.tables)
        .rolls(ScriptedRolls::new())
        .build();
    session
        .start(
            content.loadout,
            &[OpponentRef::from("rat"), OpponentRef::from("missing")],
            &content.roster,
        )
        .unwrap();

    assert_eq!(session.phase(), Phase::Active);
    assert_eq!(session.state().opponents().count(), 1);
}
