//! Content factory for building combat inputs from a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::{CombatTables, ConsumableItem, PlayerLoadout, Skill};

use crate::loaders::{ItemLoader, LoadResult, PlayerLoader, RosterLoader, SkillLoader, TablesLoader};
use crate::roster::Roster;

/// Everything loaded from one data directory.
#[derive(Debug, Clone)]
pub struct Content {
    pub tables: CombatTables,
    pub skills: BTreeMap<String, Skill>,
    pub items: BTreeMap<String, ConsumableItem>,
    pub roster: Roster,
    pub loadout: PlayerLoadout,
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml   (optional)
/// ├── skills.ron
/// ├── items.ron
/// ├── roster.ron
/// └── player.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance tables from `tables.toml`, or the defaults when absent.
    pub fn load_tables(&self) -> LoadResult<CombatTables> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            return Ok(CombatTables::default());
        }
        TablesLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<BTreeMap<String, Skill>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the consumable catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<BTreeMap<String, ConsumableItem>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load the opponent roster from `roster.ron`.
    ///
    /// # Arguments
    ///
    /// * `skills` - Catalog the roster's skill ids resolve against (load via `load_skills()`)
    pub fn load_roster(&self, skills: &BTreeMap<String, Skill>) -> LoadResult<Roster> {
        let templates = RosterLoader::load(&self.data_dir.join("roster.ron"), skills)?;
        Ok(Roster::new(templates))
    }

    /// Load the starting loadout from `player.ron`.
    pub fn load_loadout(
        &self,
        skills: &BTreeMap<String, Skill>,
        items: &BTreeMap<String, ConsumableItem>,
    ) -> LoadResult<PlayerLoadout> {
        PlayerLoader::load(&self.data_dir.join("player.ron"), skills, items)
    }

    /// Load every file in dependency order.
    pub fn load_all(&self) -> LoadResult<Content> {
        let tables = self.load_tables()?;
        let skills = self.load_skills()?;
        let items = self.load_items()?;
        let roster = self.load_roster(&skills)?;
        let loadout = self.load_loadout(&skills, &items)?;
        Ok(Content {
            tables,
            skills,
            items,
            roster,
            loadout,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
