//! Faction document: header metadata plus the ordered unit list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::unit_data::Unit;
use crate::error::{CatalogError, Result, Rule, ValidationReport};
use crate::loader::{self, LoadOptions};

/// Complete faction catalog.
///
/// Immutable once loaded; share it freely across threads.
///
/// # Example JSON
///
/// ```json
/// {
///     "faction": "Disciples de la Guerre",
///     "game": "Age of Fantasy",
///     "units": [...]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionDocument {
    /// Faction display name.
    pub faction: String,

    /// Rule system the document targets.
    pub game: String,

    /// Units in document order.
    pub units: Vec<Unit>,

    /// Keys outside the schema, kept by tolerant loading.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FactionDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new(faction: impl Into<String>, game: impl Into<String>) -> Self {
        Self {
            faction: faction.into(),
            game: game.into(),
            units: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Append a unit.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Find a unit by name.
    #[must_use]
    pub fn get_unit(&self, name: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.name == name)
    }

    /// Get all units of a categorical type.
    pub fn units_of_type<'a>(&'a self, unit_type: &'a str) -> impl Iterator<Item = &'a Unit> {
        self.units.iter().filter(move |u| u.unit_type == unit_type)
    }

    /// Canonical key/value tree for this document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if serialization fails, which only
    /// happens for non-string keys in `extra`.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| CatalogError::Parse {
            origin: self.faction.clone(),
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }

    /// Canonical pretty-printed JSON for this document.
    ///
    /// # Errors
    ///
    /// See [`FactionDocument::to_json_value`].
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Parse {
            origin: self.faction.clone(),
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }

    /// Re-check every schema rule against this in-memory document.
    ///
    /// Useful for documents built or edited in code. Returns an empty
    /// report when the document is valid.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let result = self
            .to_json_value()
            .and_then(|tree| loader::load_document_from_value(&tree, &LoadOptions::default()));

        match result {
            Ok(_) => ValidationReport::new(),
            Err(CatalogError::Schema(report)) => report,
            Err(e) => {
                let mut report = ValidationReport::new();
                report.push("", Rule::WrongType, e.to_string());
                report
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Range, Weapon};

    fn create_test_document() -> FactionDocument {
        FactionDocument::new("Disciples de la Guerre", "Age of Fantasy")
            .with_unit(Unit::new(
                "Guerriers",
                "Infantry",
                100,
                4,
                3,
                Weapon::new("Armes à main", Range::Melee, 1),
            ))
            .with_unit(Unit::new(
                "Seigneur",
                "Hero",
                70,
                3,
                2,
                Weapon::new("Lame", Range::Melee, 4),
            ))
    }

    #[test]
    fn test_get_unit() {
        let doc = create_test_document();
        assert!(doc.get_unit("Seigneur").is_some());
        assert!(doc.get_unit("seigneur").is_none());
    }

    #[test]
    fn test_units_of_type() {
        let doc = create_test_document();
        let heroes: Vec<_> = doc.units_of_type("Hero").map(|u| u.name.as_str()).collect();
        assert_eq!(heroes, vec!["Seigneur"]);
    }

    #[test]
    fn test_validate_valid_document() {
        let doc = create_test_document();
        let report = doc.validate();
        assert!(report.is_empty(), "Errors: {report}");
    }

    #[test]
    fn test_validate_reports_edits() {
        let mut doc = create_test_document();
        doc.units[1].quality = 7;
        doc.units[1].name = "Guerriers".to_string();

        let report = doc.validate();
        assert!(report.contains("units[1].quality", Rule::OutOfRange));
        assert!(report.contains("units[1].name", Rule::DuplicateName));
    }
}
