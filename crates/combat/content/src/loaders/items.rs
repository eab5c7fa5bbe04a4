//! Consumable catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use combat_core::{ConsumableItem, ItemEffect};
use serde::{Deserialize, Serialize};

use crate::legacy::parse_effect_text;
use crate::loaders::{LoadResult, read_file};

fn default_quantity() -> u32 {
    1
}

/// One consumable as authored.
///
/// Older entries describe their effect in prose through `effect_text`
/// instead of listing `effects`; those are converted at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
    #[serde(default)]
    pub effect_text: Option<String>,
}

impl ItemSpec {
    /// Build the structured consumable, converting `effect_text` if needed.
    pub fn into_item(self) -> LoadResult<ConsumableItem> {
        let effects = match (self.effects.is_empty(), &self.effect_text) {
            (true, Some(text)) => parse_effect_text(text)
                .with_context(|| format!("Item '{}' has an unreadable effect_text", self.id))?,
            _ => self.effects,
        };
        Ok(ConsumableItem {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            description: self.description,
            effects,
        })
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// Loader for the consumable catalog.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the item catalog from a RON file, keyed by item id.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an `ItemCatalog`
    ///
    /// # Returns
    ///
    /// Catalog quantities are the default stack size granted by a loadout
    /// entry that does not name its own quantity.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, ConsumableItem>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, ConsumableItem>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        catalog
            .items
            .into_iter()
            .map(|spec| spec.into_item().map(|item| (item.id.clone(), item)))
            .collect()
    }
}
