//! Skill catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::Skill;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<Skill>,
}

/// Loader for the skill catalog.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog from a RON file, keyed by skill id.
    ///
    /// Live cooldowns in the file are ignored; every skill starts ready.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Skill>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Skill>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut skills = BTreeMap::new();
        for mut skill in catalog.skills {
            if skill.id.is_empty() {
                anyhow::bail!("Skill '{}' has no id", skill.name);
            }
            skill.current_cooldown = 0;
            if let Some(previous) = skills.insert(skill.id.clone(), skill) {
                anyhow::bail!("Duplicate skill id '{}'", previous.id);
            }
        }
        Ok(skills)
    }
}
