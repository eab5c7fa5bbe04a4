//! Balance tables loader.

use std::path::Path;

use combat_core::CombatTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for the formula balance tables.
///
/// Every section and key is optional; anything missing keeps its default.
pub struct TablesLoader;

impl TablesLoader {
    /// Load tables from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse tables from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatTables> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat tables TOML: {}", e))
    }
}
