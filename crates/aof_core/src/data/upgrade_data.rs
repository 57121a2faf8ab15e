//! Upgrade menus: groups, options and mounts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::weapon_data::Weapon;

/// How many options of an upgrade group may be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// At most one option.
    One,
    /// Any subset, each option at most once.
    Multiple,
    /// At least one option, each at most once.
    OneOrMore,
    /// At most one option, applied to every model of the unit.
    UpgradeAll,
}

impl Cardinality {
    /// Every recognized cardinality.
    pub const ALL: [Self; 4] = [Self::One, Self::Multiple, Self::OneOrMore, Self::UpgradeAll];

    /// Parse the document token (`one`, `multiple`, `one_or_more`, `upgrade_all`).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == token)
    }

    /// Document token for this cardinality.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Multiple => "multiple",
            Self::OneOrMore => "one_or_more",
            Self::UpgradeAll => "upgrade_all",
        }
    }

    /// Largest number of distinct options that may be selected, if bounded.
    #[must_use]
    pub const fn max_choices(&self) -> Option<usize> {
        match self {
            Self::One | Self::UpgradeAll => Some(1),
            Self::Multiple | Self::OneOrMore => None,
        }
    }

    /// Smallest number of options that must be selected.
    #[must_use]
    pub const fn min_choices(&self) -> usize {
        match self {
            Self::OneOrMore => 1,
            Self::One | Self::Multiple | Self::UpgradeAll => 0,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creature or vehicle carrying the unit.
///
/// Fields other than `name` and `special_rules` are optional; absent
/// fields inherit from the rider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    /// Mount name, recorded on the effective profile.
    pub name: String,

    /// Rules conferred on the rider while mounted.
    #[serde(default)]
    pub special_rules: BTreeSet<String>,

    /// Replacement quality while mounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,

    /// Replacement defense while mounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<u8>,

    /// Weapons the mount fights with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapons: Option<Vec<Weapon>>,

    /// Keys outside the schema, kept by tolerant loading.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Mount {
    /// Create a mount that only confers special rules.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, special_rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            special_rules: special_rules.into_iter().map(Into::into).collect(),
            quality: None,
            defense: None,
            weapons: None,
            extra: BTreeMap::new(),
        }
    }
}

/// One entry of an upgrade menu.
///
/// Each effect is independent: an option may add cost only, rules,
/// weapons, a mount, or any combination of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeOption {
    /// Name, unique within its group.
    pub name: String,

    /// Points added to the unit when selected.
    pub cost: u32,

    /// Rules granted when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_rules: Option<BTreeSet<String>>,

    /// Weapons added when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapons: Option<Vec<Weapon>>,

    /// Mount the unit rides when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<Mount>,

    /// Keys outside the schema, kept by tolerant loading.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UpgradeOption {
    /// Create a cost-only option.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            special_rules: None,
            weapons: None,
            mount: None,
            extra: BTreeMap::new(),
        }
    }

    /// Grant a special rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.special_rules
            .get_or_insert_with(BTreeSet::new)
            .insert(rule.into());
        self
    }

    /// Grant a weapon.
    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.get_or_insert_with(Vec::new).push(weapon);
        self
    }

    /// Attach a mount.
    #[must_use]
    pub fn with_mount(mut self, mount: Mount) -> Self {
        self.mount = Some(mount);
        self
    }

    /// Check if selecting this option mounts the unit.
    #[must_use]
    pub fn has_mount(&self) -> bool {
        self.mount.is_some()
    }
}

/// A labelled menu of options with a cardinality constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeGroup {
    /// Group label, e.g. "Option". Unique within its unit.
    pub group: String,

    /// Selection cardinality.
    #[serde(rename = "type")]
    pub cardinality: Cardinality,

    /// Options in declaration order.
    pub options: Vec<UpgradeOption>,

    /// Keys outside the schema, kept by tolerant loading.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl UpgradeGroup {
    /// Create a group.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        cardinality: Cardinality,
        options: Vec<UpgradeOption>,
    ) -> Self {
        Self {
            group: group.into(),
            cardinality,
            options,
            extra: BTreeMap::new(),
        }
    }

    /// Find an option by name.
    #[must_use]
    pub fn get_option(&self, name: &str) -> Option<&UpgradeOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Declaration index of an option.
    #[must_use]
    pub fn option_index(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_tokens() {
        for cardinality in Cardinality::ALL {
            assert_eq!(Cardinality::parse(cardinality.as_str()), Some(cardinality));
        }
        assert_eq!(Cardinality::parse("any"), None);
        assert_eq!(Cardinality::parse("Multiple"), None);
    }

    #[test]
    fn test_cardinality_bounds() {
        assert_eq!(Cardinality::One.max_choices(), Some(1));
        assert_eq!(Cardinality::Multiple.max_choices(), None);
        assert_eq!(Cardinality::OneOrMore.min_choices(), 1);
        assert_eq!(Cardinality::UpgradeAll.min_choices(), 0);
    }

    #[test]
    fn test_option_absent_fields_stay_absent() {
        let option = UpgradeOption::new("Bannière", 5);
        let json = serde_json::to_value(&option).unwrap();

        assert_eq!(json, serde_json::json!({ "name": "Bannière", "cost": 5 }));
    }

    #[test]
    fn test_group_lookup() {
        let group = UpgradeGroup::new(
            "Option",
            Cardinality::Multiple,
            vec![
                UpgradeOption::new("A", 5),
                UpgradeOption::new("B", 10).with_mount(Mount::new("Cheval", ["Rapide"])),
            ],
        );

        assert_eq!(group.option_index("B"), Some(1));
        assert!(group.get_option("B").unwrap().has_mount());
        assert!(group.get_option("C").is_none());
    }
}
