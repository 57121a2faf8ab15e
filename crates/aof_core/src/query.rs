//! Read-only accessors for downstream tools.

use serde::Serialize;

use crate::data::{Cardinality, FactionDocument, Unit, UpgradeOption};
use crate::error::{CatalogError, Result};

/// Headline figures of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitSummary<'a> {
    /// Unit name.
    pub name: &'a str,
    /// Categorical type.
    pub unit_type: &'a str,
    /// Points before upgrades.
    pub base_cost: u32,
    /// Quality target number.
    pub quality: u8,
    /// Defense target number.
    pub defense: u8,
    /// Number of upgrade options across all groups.
    pub option_count: usize,
}

/// One `(group, option)` pair of a unit's upgrade menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionEntry<'a> {
    /// Group label.
    pub group: &'a str,
    /// Group cardinality.
    pub cardinality: Cardinality,
    /// The option itself.
    pub option: &'a UpgradeOption,
}

/// Summaries of every unit, in document order.
#[must_use]
pub fn list_units(document: &FactionDocument) -> Vec<UnitSummary<'_>> {
    document
        .units
        .iter()
        .map(|unit| UnitSummary {
            name: &unit.name,
            unit_type: &unit.unit_type,
            base_cost: unit.base_cost,
            quality: unit.quality,
            defense: unit.defense,
            option_count: unit.upgrade_groups.iter().map(|g| g.options.len()).sum(),
        })
        .collect()
}

/// Find a unit by exact name.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if no unit has that name.
pub fn find_unit<'a>(document: &'a FactionDocument, name: &str) -> Result<&'a Unit> {
    document
        .get_unit(name)
        .ok_or_else(|| CatalogError::NotFound(format!("unit '{name}' in '{}'", document.faction)))
}

/// Every upgrade option of a unit, flattened in declaration order.
#[must_use]
pub fn list_options(unit: &Unit) -> Vec<OptionEntry<'_>> {
    unit.upgrade_groups
        .iter()
        .flat_map(|group| {
            group.options.iter().map(move |option| OptionEntry {
                group: &group.group,
                cardinality: group.cardinality,
                option,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Range, UpgradeGroup, Weapon};

    fn create_test_document() -> FactionDocument {
        let hero = Unit::new(
            "Seigneur",
            "Hero",
            70,
            3,
            2,
            Weapon::new("Lame", Range::Melee, 4),
        )
        .with_group(UpgradeGroup::new(
            "Arme",
            Cardinality::One,
            vec![UpgradeOption::new("Hache", 5), UpgradeOption::new("Lance", 5)],
        ))
        .with_group(UpgradeGroup::new(
            "Option",
            Cardinality::Multiple,
            vec![UpgradeOption::new("Bannière", 10)],
        ));

        FactionDocument::new("Disciples de la Guerre", "Age of Fantasy")
            .with_unit(Unit::new(
                "Guerriers",
                "Infantry",
                100,
                4,
                3,
                Weapon::new("Armes à main", Range::Melee, 1),
            ))
            .with_unit(hero)
    }

    #[test]
    fn test_list_units_keeps_order() {
        let doc = create_test_document();
        let units = list_units(&doc);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].name, "Guerriers");
        assert_eq!(units[1].name, "Seigneur");
        assert_eq!(units[1].option_count, 3);
    }

    #[test]
    fn test_find_unit() {
        let doc = create_test_document();
        assert_eq!(find_unit(&doc, "Seigneur").unwrap().base_cost, 70);
        assert!(matches!(
            find_unit(&doc, "Dragon"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_options_flattens_groups() {
        let doc = create_test_document();
        let unit = find_unit(&doc, "Seigneur").unwrap();

        let pairs: Vec<_> = list_options(unit)
            .iter()
            .map(|e| (e.group, e.option.name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Arme", "Hache"), ("Arme", "Lance"), ("Option", "Bannière")]
        );
    }
}
