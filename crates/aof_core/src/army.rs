//! Army lists: chosen units with their selections, costed against a faction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cost::total_cost;
use crate::data::FactionDocument;
use crate::error::{CatalogError, Result};
use crate::profile::{resolve_profile, EffectiveProfile};
use crate::query::find_unit;
use crate::selection::Selection;

/// One unit instance in an army list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyEntry {
    /// Name of the unit in the faction document.
    pub unit: String,
    /// Chosen upgrades.
    #[serde(default)]
    pub selection: Selection,
}

/// A player's army list.
///
/// # Example JSON
///
/// ```json
/// {
///     "name": "Ost de la Manticore",
///     "faction": "Disciples de la Guerre",
///     "points_limit": 1000,
///     "entries": [
///         { "unit": "Maître de la Guerre Élu", "selection": { "Option": ["Manticore"] } }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyList {
    /// List name.
    pub name: String,
    /// Faction the list is built from.
    pub faction: String,
    /// Maximum total points, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_limit: Option<u64>,
    /// Unit instances in list order.
    #[serde(default)]
    pub entries: Vec<ArmyEntry>,
}

/// Costed and resolved army list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatedEntry {
    /// Points for this entry.
    pub cost: u64,
    /// Effective profile for this entry.
    pub profile: EffectiveProfile,
}

/// Result of evaluating a whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmyEvaluation {
    /// Entries in list order.
    pub entries: Vec<EvaluatedEntry>,
    /// Sum of every entry's cost.
    pub total: u64,
}

impl ArmyList {
    /// Create an empty list.
    #[must_use]
    pub fn new(name: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            faction: faction.into(),
            points_limit: None,
            entries: Vec::new(),
        }
    }

    /// Append a unit with its selection.
    #[must_use]
    pub fn with_entry(mut self, unit: impl Into<String>, selection: Selection) -> Self {
        self.entries.push(ArmyEntry {
            unit: unit.into(),
            selection,
        });
        self
    }

    /// Read a list from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] or [`CatalogError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| CatalogError::Parse {
            origin: path.display().to_string(),
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }

    /// Cost and resolve every entry against a faction document.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the list targets another faction or
    ///   names an unknown unit.
    /// - Selection legality errors for any entry.
    /// - [`CatalogError::ArmyOverLimit`] if the total exceeds the limit.
    pub fn evaluate(&self, document: &FactionDocument) -> Result<ArmyEvaluation> {
        if self.faction != document.faction {
            return Err(CatalogError::NotFound(format!(
                "faction '{}' (document is '{}')",
                self.faction, document.faction
            )));
        }

        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let unit = find_unit(document, &entry.unit)?;
                Ok(EvaluatedEntry {
                    cost: total_cost(unit, &entry.selection)?,
                    profile: resolve_profile(unit, &entry.selection)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total: u64 = entries.iter().map(|e| e.cost).sum();
        if let Some(limit) = self.points_limit {
            if total > limit {
                return Err(CatalogError::ArmyOverLimit { total, limit });
            }
        }

        tracing::debug!(
            "Army list '{}': {} entries, {} pts",
            self.name,
            entries.len(),
            total
        );

        Ok(ArmyEvaluation { entries, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cardinality, Range, Unit, UpgradeGroup, UpgradeOption, Weapon};

    fn create_test_document() -> FactionDocument {
        FactionDocument::new("Disciples de la Guerre", "Age of Fantasy").with_unit(
            Unit::new(
                "Guerriers",
                "Infantry",
                100,
                4,
                3,
                Weapon::new("Armes à main", Range::Melee, 1),
            )
            .with_group(UpgradeGroup::new(
                "Option",
                Cardinality::Multiple,
                vec![UpgradeOption::new("Boucliers", 15)],
            )),
        )
    }

    #[test]
    fn test_evaluate_totals_entries() {
        let doc = create_test_document();
        let army = ArmyList::new("Ost", "Disciples de la Guerre")
            .with_entry("Guerriers", Selection::new())
            .with_entry("Guerriers", Selection::new().with("Option", "Boucliers"));

        let evaluation = army.evaluate(&doc).unwrap();
        assert_eq!(evaluation.total, 215);
        assert_eq!(evaluation.entries[1].cost, 115);
    }

    #[test]
    fn test_points_limit() {
        let doc = create_test_document();
        let mut army = ArmyList::new("Ost", "Disciples de la Guerre")
            .with_entry("Guerriers", Selection::new())
            .with_entry("Guerriers", Selection::new());
        army.points_limit = Some(150);

        let err = army.evaluate(&doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ArmyOverLimit {
                total: 200,
                limit: 150
            }
        ));
    }

    #[test]
    fn test_unknown_unit_and_faction() {
        let doc = create_test_document();

        let army = ArmyList::new("Ost", "Disciples de la Guerre")
            .with_entry("Chevaliers", Selection::new());
        assert!(matches!(army.evaluate(&doc), Err(CatalogError::NotFound(_))));

        let army = ArmyList::new("Ost", "Elfes");
        assert!(matches!(army.evaluate(&doc), Err(CatalogError::NotFound(_))));
    }
}
