//! Point cost calculation.

use crate::data::Unit;
use crate::error::Result;
use crate::selection::{resolve_selection, Selection};

/// Total points of a unit with the given upgrades.
///
/// `base_cost + Σ option.cost` over every selected option. Independent of
/// the order in which the selection lists its picks.
///
/// # Errors
///
/// Fails with the legality errors of [`resolve_selection`].
pub fn total_cost(unit: &Unit, selection: &Selection) -> Result<u64> {
    let chosen = resolve_selection(unit, selection)?;
    let upgrades: u64 = chosen.iter().map(|c| u64::from(c.option.cost)).sum();
    Ok(u64::from(unit.base_cost) + upgrades)
}

/// Itemized cost of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdown {
    /// Unit points before upgrades.
    pub base_cost: u64,
    /// `(group, option, cost)` for each chosen option, in declaration order.
    pub upgrades: Vec<(String, String, u64)>,
}

impl CostBreakdown {
    /// Sum of the base cost and all upgrades.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.base_cost + self.upgrades.iter().map(|(_, _, cost)| cost).sum::<u64>()
    }
}

/// Itemize the cost of a selection.
///
/// # Errors
///
/// Fails with the legality errors of [`resolve_selection`].
pub fn cost_breakdown(unit: &Unit, selection: &Selection) -> Result<CostBreakdown> {
    let chosen = resolve_selection(unit, selection)?;
    Ok(CostBreakdown {
        base_cost: u64::from(unit.base_cost),
        upgrades: chosen
            .iter()
            .map(|c| {
                (
                    c.group.group.clone(),
                    c.option.name.clone(),
                    u64::from(c.option.cost),
                )
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cardinality, Range, UpgradeGroup, UpgradeOption, Weapon};
    use crate::error::CatalogError;

    fn create_test_unit() -> Unit {
        Unit::new(
            "Guerriers",
            "Infantry",
            100,
            4,
            3,
            Weapon::new("Armes à main", Range::Melee, 1),
        )
        .with_group(UpgradeGroup::new(
            "Équipement",
            Cardinality::Multiple,
            vec![
                UpgradeOption::new("Boucliers", 15).with_rule("Bouclier"),
                UpgradeOption::new("Musicien", 10),
            ],
        ))
        .with_group(UpgradeGroup::new(
            "Champion",
            Cardinality::One,
            vec![UpgradeOption::new("Champion", 5)],
        ))
    }

    #[test]
    fn test_empty_selection_costs_base() {
        let unit = create_test_unit();
        assert_eq!(total_cost(&unit, &Selection::new()).unwrap(), 100);
    }

    #[test]
    fn test_cost_sums_options() {
        let unit = create_test_unit();
        let selection = Selection::new()
            .with("Équipement", "Boucliers")
            .with("Équipement", "Musicien")
            .with("Champion", "Champion");

        assert_eq!(total_cost(&unit, &selection).unwrap(), 130);
    }

    #[test]
    fn test_illegal_selection_has_no_cost() {
        let unit = create_test_unit();
        let selection = Selection::new().with("Champion", "Porte-étendard");

        assert!(matches!(
            total_cost(&unit, &selection),
            Err(CatalogError::IllegalSelection { .. })
        ));
    }

    #[test]
    fn test_breakdown_matches_total() {
        let unit = create_test_unit();
        let selection = Selection::new()
            .with("Champion", "Champion")
            .with("Équipement", "Musicien");

        let breakdown = cost_breakdown(&unit, &selection).unwrap();
        assert_eq!(breakdown.total(), total_cost(&unit, &selection).unwrap());
        assert_eq!(breakdown.upgrades[0].1, "Musicien");
        assert_eq!(breakdown.upgrades[1].1, "Champion");
    }
}
