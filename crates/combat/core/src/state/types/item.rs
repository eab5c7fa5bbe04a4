use super::status::EffectGrant;

/// Structured effect of a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    RestoreHp(u32),
    RestoreMp(u32),
    Grant(EffectGrant),
}

/// A stack of identical consumables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Flavor text; never interpreted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<ItemEffect>,
}

impl ConsumableItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            description: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// The player's consumables during an encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    pub items: Vec<ConsumableItem>,
}

impl Inventory {
    pub fn new(items: Vec<ConsumableItem>) -> Self {
        Self { items }
    }

    /// A stack with at least one unit left.
    pub fn get(&self, item_id: &str) -> Option<&ConsumableItem> {
        self.items
            .iter()
            .find(|item| item.id == item_id && item.quantity > 0)
    }

    /// Remove one unit; the stack disappears when it runs out.
    pub(crate) fn consume(&mut self, item_id: &str) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.id == item_id && item.quantity > 0)
        else {
            return false;
        };
        self.items[index].quantity -= 1;
        if self.items[index].quantity == 0 {
            self.items.remove(index);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consuming_last_unit_removes_stack() {
        let mut inventory = Inventory::new(vec![
            ConsumableItem::new("potion", "Potion", 2),
            ConsumableItem::new("ether", "Ether", 1),
        ]);

        assert!(inventory.consume("potion"));
        assert_eq!(inventory.get("potion").map(|i| i.quantity), Some(1));

        assert!(inventory.consume("ether"));
        assert!(inventory.get("ether").is_none());
        assert_eq!(inventory.items.len(), 1);

        assert!(!inventory.consume("ether"));
    }
}
