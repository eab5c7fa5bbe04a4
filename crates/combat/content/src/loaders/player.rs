//! Starting loadout loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::{ConsumableItem, Inventory, PlayerLoadout, Skill};
use serde::{Deserialize, Serialize};

use crate::loaders::{CombatantSpec, LoadResult, read_file};

/// One inventory line: a catalog item and an optional stack size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// The player's side as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub player: CombatantSpec,
    #[serde(default)]
    pub companions: Vec<CombatantSpec>,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
}

impl PlayerSpec {
    /// Resolve skills and items into a loadout.
    pub fn into_loadout(
        self,
        skills: &BTreeMap<String, Skill>,
        items: &BTreeMap<String, ConsumableItem>,
    ) -> LoadResult<PlayerLoadout> {
        let player = self.player.into_template(skills)?;
        let companions = self
            .companions
            .into_iter()
            .map(|spec| spec.into_template(skills))
            .collect::<LoadResult<Vec<_>>>()?;

        let mut stacks: Vec<ConsumableItem> = Vec::new();
        for entry in self.inventory {
            let item = items
                .get(&entry.item)
                .ok_or_else(|| anyhow::anyhow!("Loadout names unknown item '{}'", entry.item))?;
            let quantity = entry.quantity.unwrap_or(item.quantity);
            match stacks.iter_mut().find(|stack| stack.id == item.id) {
                Some(stack) => stack.quantity += quantity,
                None => stacks.push(ConsumableItem {
                    quantity,
                    ..item.clone()
                }),
            }
        }
        stacks.retain(|stack| stack.quantity > 0);

        Ok(PlayerLoadout {
            player,
            companions,
            inventory: Inventory::new(stacks),
        })
    }
}

/// Loader for the starting loadout.
pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load(
        path: &Path,
        skills: &BTreeMap<String, Skill>,
        items: &BTreeMap<String, ConsumableItem>,
    ) -> LoadResult<PlayerLoadout> {
        let content = read_file(path)?;
        Self::parse(&content, skills, items)
    }

    pub fn parse(
        content: &str,
        skills: &BTreeMap<String, Skill>,
        items: &BTreeMap<String, ConsumableItem>,
    ) -> LoadResult<PlayerLoadout> {
        let spec: PlayerSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse player loadout RON: {}", e))?;
        spec.into_loadout(skills, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::ItemEffect;

    fn items() -> BTreeMap<String, ConsumableItem> {
        let potion =
            ConsumableItem::new("potion", "Potion", 3).with_effect(ItemEffect::RestoreHp(20));
        BTreeMap::from([(potion.id.clone(), potion)])
    }

    #[test]
    fn repeated_entries_merge_into_one_stack() {
        let loadout = PlayerLoader::parse(
            r#"(
                player: (name: "Hero", kind: player, max_hp: 100, max_mp: 20),
                inventory: [(item: "potion"), (item: "potion", quantity: Some(2))],
            )"#,
            &BTreeMap::new(),
            &items(),
        )
        .unwrap();

        assert_eq!(loadout.inventory.items.len(), 1);
        assert_eq!(loadout.inventory.items[0].quantity, 5);
        assert!(loadout.companions.is_empty());
    }

    #[test]
    fn unknown_item_is_an_error() {
        let result = PlayerLoader::parse(
            r#"(player: (name: "Hero", kind: player, max_hp: 1), inventory: [(item: "bomb")])"#,
            &BTreeMap::new(),
            &items(),
        );
        assert!(result.is_err());
    }
}
