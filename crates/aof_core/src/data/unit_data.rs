//! Unit entries: combat statistics, weapons and upgrade menus.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::upgrade_data::{UpgradeGroup, UpgradeOption};
use super::weapon_data::Weapon;

/// Lowest (best) legal quality or defense value.
pub const MIN_STAT: u8 = 2;

/// Highest (worst) legal quality or defense value.
pub const MAX_STAT: u8 = 6;

/// A unit of the faction.
///
/// # Example JSON
///
/// ```json
/// {
///     "name": "Maître de la Guerre Élu",
///     "type": "Hero",
///     "base_cost": 60,
///     "quality": 3,
///     "defense": 2,
///     "special_rules": ["Héros"],
///     "weapons": [{ "name": "Arme lourde", "range": "-", "attacks": 4 }],
///     "upgrade_groups": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Name, unique within the document.
    pub name: String,

    /// Categorical token such as "Hero" or "Infantry". Treated as opaque.
    #[serde(rename = "type")]
    pub unit_type: String,

    /// Points cost with no upgrades.
    pub base_cost: u32,

    /// Quality target number (2-6, lower is better).
    pub quality: u8,

    /// Defense target number (2-6, lower is better).
    pub defense: u8,

    /// Intrinsic special rules.
    #[serde(default)]
    pub special_rules: BTreeSet<String>,

    /// Weapons in display order. Never empty in a validated document.
    pub weapons: Vec<Weapon>,

    /// Upgrade menus in declaration order.
    #[serde(default)]
    pub upgrade_groups: Vec<UpgradeGroup>,

    /// Keys outside the schema, kept by tolerant loading.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Unit {
    /// Create a unit with a single weapon and no upgrades.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        unit_type: impl Into<String>,
        base_cost: u32,
        quality: u8,
        defense: u8,
        weapon: Weapon,
    ) -> Self {
        Self {
            name: name.into(),
            unit_type: unit_type.into(),
            base_cost,
            quality,
            defense,
            special_rules: BTreeSet::new(),
            weapons: vec![weapon],
            upgrade_groups: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Add an intrinsic special rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.special_rules.insert(rule.into());
        self
    }

    /// Append an upgrade group.
    #[must_use]
    pub fn with_group(mut self, group: UpgradeGroup) -> Self {
        self.upgrade_groups.push(group);
        self
    }

    /// Find an upgrade group by label.
    #[must_use]
    pub fn get_group(&self, label: &str) -> Option<&UpgradeGroup> {
        self.upgrade_groups.iter().find(|g| g.group == label)
    }

    /// Find an option within a named group.
    #[must_use]
    pub fn get_option(&self, group: &str, option: &str) -> Option<&UpgradeOption> {
        self.get_group(group).and_then(|g| g.get_option(option))
    }

    /// Check if this unit has the specified intrinsic rule.
    #[must_use]
    pub fn has_rule(&self, rule: &str) -> bool {
        self.special_rules.contains(rule)
    }

    /// Check if any option of this unit carries a mount.
    #[must_use]
    pub fn can_be_mounted(&self) -> bool {
        self.upgrade_groups
            .iter()
            .flat_map(|g| &g.options)
            .any(UpgradeOption::has_mount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cardinality, Mount, Range};

    fn create_test_unit() -> Unit {
        Unit::new(
            "Champion",
            "Hero",
            40,
            4,
            4,
            Weapon::new("Épée", Range::Melee, 3),
        )
        .with_rule("Héros")
        .with_group(UpgradeGroup::new(
            "Monture",
            Cardinality::One,
            vec![UpgradeOption::new("Destrier", 20).with_mount(Mount::new("Destrier", ["Rapide"]))],
        ))
    }

    #[test]
    fn test_get_option() {
        let unit = create_test_unit();
        assert!(unit.get_option("Monture", "Destrier").is_some());
        assert!(unit.get_option("Monture", "Pégase").is_none());
        assert!(unit.get_option("Option", "Destrier").is_none());
    }

    #[test]
    fn test_has_rule() {
        let unit = create_test_unit();
        assert!(unit.has_rule("Héros"));
        assert!(!unit.has_rule("heros"));
    }

    #[test]
    fn test_can_be_mounted() {
        let mut unit = create_test_unit();
        assert!(unit.can_be_mounted());

        unit.upgrade_groups.clear();
        assert!(!unit.can_be_mounted());
    }
}
