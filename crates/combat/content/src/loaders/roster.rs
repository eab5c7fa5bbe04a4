//! Combatant roster loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{CombatantKind, CombatantTemplate, Skill, StatBlock};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A combatant as authored: the template fields, with skills named by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub kind: CombatantKind,
    pub max_hp: u32,
    #[serde(default)]
    pub max_mp: u32,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub mp: Option<u32>,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub accuracy: i32,
    #[serde(default)]
    pub evasion: i32,
    #[serde(default)]
    pub crit_chance: Option<i32>,
    #[serde(default)]
    pub crit_multiplier: Option<f64>,
    #[serde(default)]
    pub equipment: StatBlock,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CombatantSpec {
    /// Resolve skill ids against the catalog.
    ///
    /// # Errors
    ///
    /// Fails on the first skill id the catalog does not define.
    pub fn into_template(self, catalog: &BTreeMap<String, Skill>) -> LoadResult<CombatantTemplate> {
        let skills = self
            .skills
            .iter()
            .map(|id| {
                catalog
                    .get(id)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("'{}' knows unknown skill '{}'", self.name, id))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(CombatantTemplate {
            name: self.name,
            kind: self.kind,
            max_hp: self.max_hp,
            max_mp: self.max_mp,
            hp: self.hp,
            mp: self.mp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            accuracy: self.accuracy,
            evasion: self.evasion,
            crit_chance: self.crit_chance,
            crit_multiplier: self.crit_multiplier,
            equipment: self.equipment,
            skills,
        })
    }
}

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    pub combatants: BTreeMap<String, CombatantSpec>,
}

/// Loader for the opponent roster.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the roster from a RON file, resolving skills against `skills`.
    ///
    /// # Returns
    ///
    /// Templates keyed by the reference string encounters use.
    pub fn load(
        path: &Path,
        skills: &BTreeMap<String, Skill>,
    ) -> LoadResult<BTreeMap<String, CombatantTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, skills)
    }

    pub fn parse(
        content: &str,
        skills: &BTreeMap<String, Skill>,
    ) -> LoadResult<BTreeMap<String, CombatantTemplate>> {
        let catalog: RosterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        catalog
            .combatants
            .into_iter()
            .map(|(key, spec)| spec.into_template(skills).map(|template| (key, template)))
            .collect()
    }
}
