use super::common::CombatantId;
use super::item::Inventory;
use super::skill::Skill;
use super::status::StatusEffect;
use crate::combat::{apply_damage, apply_healing};
use crate::config::CombatTables;
use crate::stats::{self, StatBlock, StatBreakdown, StatKey};

/// What a combatant is, which also decides its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatantKind {
    Player,
    Companion,
    Npc,
    Beast,
}

impl CombatantKind {
    pub const fn is_player_side(self) -> bool {
        matches!(self, CombatantKind::Player | CombatantKind::Companion)
    }

    pub const fn side(self) -> Side {
        if self.is_player_side() {
            Side::Player
        } else {
            Side::Opponent
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Player,
    Opponent,
}

/// What happens to a defeated opponent once the encounter is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Disposition {
    #[default]
    Kill,
    Capture,
    Release,
}

/// Resources, stat layers and active effects of one combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub base: StatBlock,
    pub equipment: StatBlock,
    pub crit_multiplier: f64,
    pub active_effects: Vec<StatusEffect>,
}

impl CombatStats {
    /// The three layers of one stat.
    pub fn breakdown(&self, key: StatKey) -> StatBreakdown {
        stats::layer_stat(&self.base, &self.equipment, &self.active_effects, key)
    }

    pub fn effective(&self, key: StatKey) -> i32 {
        self.breakdown(key).total()
    }

    pub fn effective_block(&self) -> StatBlock {
        stats::effective_block(&self.base, &self.equipment, &self.active_effects)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Returns the HP actually lost.
    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = apply_damage(self.hp, amount);
        before - self.hp
    }

    /// Returns the HP actually restored.
    pub(crate) fn restore_hp(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = apply_healing(self.hp, amount, self.max_hp);
        self.hp - before
    }

    /// Returns the MP actually restored.
    pub(crate) fn restore_mp(&mut self, amount: u32) -> u32 {
        let before = self.mp;
        self.mp = apply_healing(self.mp, amount, self.max_mp);
        self.mp - before
    }

    pub(crate) fn spend_mp(&mut self, cost: u32) -> bool {
        match self.mp.checked_sub(cost) {
            Some(rest) => {
                self.mp = rest;
                true
            }
            None => false,
        }
    }

    pub(crate) fn add_effect(&mut self, mut effect: StatusEffect, turn_serial: u64) {
        effect.applied_on_turn = turn_serial;
        self.active_effects.push(effect);
    }

    /// End-of-turn countdown. Effects attached on `turn_serial` are left alone.
    pub(crate) fn tick_effects(&mut self, turn_serial: u64) {
        self.active_effects.retain_mut(|effect| {
            effect.applied_on_turn == turn_serial || !effect.tick()
        });
    }
}

/// A participant in an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub is_player: bool,
    pub kind: CombatantKind,
    /// Roster key the combatant was built from, if any.
    pub template_key: Option<String>,
    /// Position in which the combatant joined; breaks speed ties.
    pub join_index: usize,
    pub stats: CombatStats,
    pub skills: Vec<Skill>,
    pub disposition: Option<Disposition>,
}

impl Combatant {
    pub fn from_template(
        id: CombatantId,
        join_index: usize,
        template: &CombatantTemplate,
        template_key: Option<String>,
        tables: &CombatTables,
    ) -> Self {
        let max_hp = template.max_hp;
        let max_mp = template.max_mp;
        let base = StatBlock {
            attack: template.attack,
            defense: template.defense,
            speed: template.speed,
            accuracy: template.accuracy,
            evasion: template.evasion,
            crit_chance: template.crit_chance.unwrap_or(tables.crit.default_chance),
        };

        Self {
            id,
            name: template.name.clone(),
            is_player: template.kind == CombatantKind::Player,
            kind: template.kind,
            template_key,
            join_index,
            stats: CombatStats {
                hp: template.hp.unwrap_or(max_hp).min(max_hp),
                max_hp,
                mp: template.mp.unwrap_or(max_mp).min(max_mp),
                max_mp,
                base,
                equipment: template.equipment,
                crit_multiplier: template
                    .crit_multiplier
                    .unwrap_or(tables.crit.default_multiplier),
                active_effects: Vec::new(),
            },
            skills: template.skills.clone(),
            disposition: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn side(&self) -> Side {
        self.kind.side()
    }

    pub fn is_hostile_to(&self, other: &Combatant) -> bool {
        self.side() != other.side()
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    pub(crate) fn skill_mut(&mut self, skill_id: &str) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == skill_id)
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            hp: self.stats.hp,
            max_hp: self.stats.max_hp,
            mp: self.stats.mp,
            max_mp: self.stats.max_mp,
            effective: self.stats.effective_block(),
            active_effects: self.stats.active_effects.clone(),
            disposition: self.disposition,
        }
    }

    /// Template carrying the combatant's current resources and cooldowns.
    pub fn to_template(&self) -> CombatantTemplate {
        CombatantTemplate {
            name: self.name.clone(),
            kind: self.kind,
            max_hp: self.stats.max_hp,
            max_mp: self.stats.max_mp,
            hp: Some(self.stats.hp),
            mp: Some(self.stats.mp),
            attack: self.stats.base.attack,
            defense: self.stats.base.defense,
            speed: self.stats.base.speed,
            accuracy: self.stats.base.accuracy,
            evasion: self.stats.base.evasion,
            crit_chance: Some(self.stats.base.crit_chance),
            crit_multiplier: Some(self.stats.crit_multiplier),
            equipment: self.stats.equipment,
            skills: self.skills.clone(),
        }
    }
}

/// Definition a combatant is built from.
///
/// Missing `hp`/`mp` start full; missing crit values fall back to the balance
/// tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub kind: CombatantKind,
    pub max_hp: u32,
    pub max_mp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub evasion: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_multiplier: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
}

impl CombatantTemplate {
    pub fn new(name: impl Into<String>, kind: CombatantKind, max_hp: u32, max_mp: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            max_hp,
            max_mp,
            hp: None,
            mp: None,
            attack: 0,
            defense: 0,
            speed: 0,
            accuracy: 0,
            evasion: 0,
            crit_chance: None,
            crit_multiplier: None,
            equipment: StatBlock::ZERO,
            skills: Vec::new(),
        }
    }

    pub fn with_stats(mut self, attack: i32, defense: i32, speed: i32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.speed = speed;
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// Everything the knowledge store hands over for the player's side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerLoadout {
    pub player: CombatantTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub companions: Vec<CombatantTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,
}

impl PlayerLoadout {
    pub fn new(player: CombatantTemplate) -> Self {
        Self {
            player,
            companions: Vec::new(),
            inventory: Inventory::default(),
        }
    }
}

/// Read-only view of a combatant for payloads and displays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub kind: CombatantKind,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub effective: StatBlock,
    pub active_effects: Vec<StatusEffect>,
    pub disposition: Option<Disposition>,
}
