//! Content loaders for reading combat data from files.
//!
//! Each loader turns one RON/TOML file into the structures `combat-core`
//! consumes. [`ContentFactory`] ties them together for a data directory.

pub mod factory;
pub mod items;
pub mod player;
pub mod roster;
pub mod skills;
pub mod tables;

pub use factory::{Content, ContentFactory};
pub use items::{ItemLoader, ItemSpec};
pub use player::{PlayerLoader, PlayerSpec};
pub use roster::{CombatantSpec, RosterLoader};
pub use skills::SkillLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
