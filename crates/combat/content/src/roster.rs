//! Opponent lookup backed by loaded content.

use std::collections::BTreeMap;

use combat_core::{CombatantTemplate, OpponentRef, RosterOracle};

/// Opponent templates keyed by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    templates: BTreeMap<String, CombatantTemplate>,
}

impl Roster {
    pub fn new(templates: BTreeMap<String, CombatantTemplate>) -> Self {
        Self { templates }
    }

    pub fn insert(&mut self, key: impl Into<String>, template: CombatantTemplate) {
        self.templates.insert(key.into(), template);
    }

    pub fn get(&self, key: &str) -> Option<&CombatantTemplate> {
        self.templates.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl RosterOracle for Roster {
    fn opponent(&self, reference: &OpponentRef) -> Option<CombatantTemplate> {
        self.get(reference.as_str()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CombatantKind;

    #[test]
    fn resolves_known_references_only() {
        let mut roster = Roster::default();
        roster.insert("slime", CombatantTemplate::new("Slime", CombatantKind::Beast, 12, 0));

        assert_eq!(
            roster.opponent(&OpponentRef::from("slime")).map(|t| t.name),
            Some("Slime".to_string())
        );
        assert!(roster.opponent(&OpponentRef::from("dragon")).is_none());
        assert_eq!(roster.keys().collect::<Vec<_>>(), vec!["slime"]);
    }
}
