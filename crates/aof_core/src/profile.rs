//! Effective combat profiles.
//!
//! The resolver is a pure function of `(Unit, Selection)`: it starts from
//! the unit's intrinsic profile, unions in the rules of each chosen option,
//! appends their weapons in declaration order, then applies the mount.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::{Unit, Weapon};
use crate::error::Result;
use crate::selection::{resolve_selection, Selection};

/// Combat profile of a unit after applying a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveProfile {
    /// Unit name.
    pub unit: String,
    /// Unit categorical type.
    pub unit_type: String,
    /// Quality, from the mount when it overrides it.
    pub quality: u8,
    /// Defense, from the mount when it overrides it.
    pub defense: u8,
    /// Union of intrinsic, option and mount rules.
    pub special_rules: BTreeSet<String>,
    /// Intrinsic weapons, then option weapons, then mount weapons.
    pub weapons: Vec<Weapon>,
    /// Name of the active mount.
    pub mount: Option<String>,
}

impl EffectiveProfile {
    /// Profile of the unit with nothing selected.
    #[must_use]
    pub fn intrinsic(unit: &Unit) -> Self {
        Self {
            unit: unit.name.clone(),
            unit_type: unit.unit_type.clone(),
            quality: unit.quality,
            defense: unit.defense,
            special_rules: unit.special_rules.clone(),
            weapons: unit.weapons.clone(),
            mount: None,
        }
    }

    /// Check if the unit rides a mount.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Check if the profile carries a rule.
    #[must_use]
    pub fn has_rule(&self, rule: &str) -> bool {
        self.special_rules.contains(rule)
    }
}

/// Resolve the effective profile of a unit under a selection.
///
/// # Errors
///
/// Fails with the legality errors of [`resolve_selection`], including
/// [`crate::error::CatalogError::ConflictingMounts`].
pub fn resolve_profile(unit: &Unit, selection: &Selection) -> Result<EffectiveProfile> {
    let chosen = resolve_selection(unit, selection)?;
    let mut profile = EffectiveProfile::intrinsic(unit);

    for choice in &chosen {
        if let Some(rules) = &choice.option.special_rules {
            profile.special_rules.extend(rules.iter().cloned());
        }
        if let Some(weapons) = &choice.option.weapons {
            profile.weapons.extend(weapons.iter().cloned());
        }
    }

    // At most one mount survives the legality check.
    if let Some(mount) = chosen.iter().find_map(|c| c.option.mount.as_ref()) {
        profile
            .special_rules
            .extend(mount.special_rules.iter().cloned());
        if let Some(weapons) = &mount.weapons {
            profile.weapons.extend(weapons.iter().cloned());
        }
        profile.quality = mount.quality.unwrap_or(unit.quality);
        profile.defense = mount.defense.unwrap_or(unit.defense);
        profile.mount = Some(mount.name.clone());
    }

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cardinality, Mount, Range, UpgradeGroup, UpgradeOption};

    fn create_test_unit() -> Unit {
        let mut griffon = Mount::new("Griffon", ["Vol", "Peur"]);
        griffon.defense = Some(3);
        griffon.weapons = Some(vec![Weapon::new("Serres", Range::Melee, 3)]);

        Unit::new(
            "Seigneur",
            "Hero",
            70,
            3,
            4,
            Weapon::new("Lame", Range::Melee, 4),
        )
        .with_rule("Héros")
        .with_group(UpgradeGroup::new(
            "Option",
            Cardinality::Multiple,
            vec![
                UpgradeOption::new("Arc", 5)
                    .with_weapon(Weapon::new("Arc", Range::Distance(24), 1))
                    .with_rule("Tireur"),
                UpgradeOption::new("Griffon", 90).with_mount(griffon),
                UpgradeOption::new("Talisman", 10).with_rule("Héros"),
            ],
        ))
    }

    #[test]
    fn test_empty_selection_is_intrinsic() {
        let unit = create_test_unit();
        let profile = resolve_profile(&unit, &Selection::new()).unwrap();
        assert_eq!(profile, EffectiveProfile::intrinsic(&unit));
        assert!(!profile.is_mounted());
    }

    #[test]
    fn test_option_rules_and_weapons() {
        let unit = create_test_unit();
        let selection = Selection::new()
            .with("Option", "Talisman")
            .with("Option", "Arc");

        let profile = resolve_profile(&unit, &selection).unwrap();
        assert!(profile.has_rule("Tireur"));
        assert_eq!(profile.special_rules.len(), 2);
        let names: Vec<_> = profile.weapons.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Lame", "Arc"]);
    }

    #[test]
    fn test_mount_applies() {
        let unit = create_test_unit();
        let selection = Selection::new()
            .with("Option", "Griffon")
            .with("Option", "Arc");

        let profile = resolve_profile(&unit, &selection).unwrap();
        assert!(profile.is_mounted());
        assert_eq!(profile.mount.as_deref(), Some("Griffon"));
        assert!(profile.has_rule("Vol"));
        assert!(profile.has_rule("Peur"));
        assert_eq!(profile.quality, 3);
        assert_eq!(profile.defense, 3);
        let names: Vec<_> = profile.weapons.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Lame", "Arc", "Serres"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let unit = create_test_unit();
        let selection = Selection::new().with("Option", "Griffon");

        let first = resolve_profile(&unit, &selection).unwrap();
        let second = resolve_profile(&unit, &selection).unwrap();
        assert_eq!(first, second);
    }
}
