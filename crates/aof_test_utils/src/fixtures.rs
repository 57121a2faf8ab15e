//! Test fixtures and helpers.
//!
//! The sample "Disciples de la Guerre" document plus small builders
//! for hand-made documents.

use std::path::PathBuf;

use aof_core::data::{FactionDocument, Unit};
use aof_core::loader::{load_document_from_str, DocumentFormat, LoadOptions};

/// Text of the sample faction document.
pub const SAMPLE_DOCUMENT: &str =
    include_str!("../../../assets/data/factions/disciples_de_la_guerre.json");

/// Name of the only unit of the sample document.
pub const SAMPLE_HERO: &str = "Maître de la Guerre Élu";

/// Label of the hero's upgrade group.
pub const SAMPLE_GROUP: &str = "Option";

/// Scout aura option of the sample hero (15 pts).
pub const CONQUERANT: &str = "Conquérant (Aura d'Éclaireur)";

/// Unpredictable-combat aura option of the sample hero (10 pts).
pub const MARAUDER: &str = "Marauder (Aura de combat imprévisible)";

/// Mount option of the sample hero (195 pts).
pub const MANTICORE: &str = "Manticore";

/// Path of the directory holding the sample faction data.
#[must_use]
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/data/factions")
}

/// Load and validate the sample document.
///
/// # Panics
///
/// Panics if the sample document fails to load.
#[must_use]
pub fn sample_document() -> FactionDocument {
    load_document_from_str(SAMPLE_DOCUMENT, DocumentFormat::Json, &LoadOptions::default())
        .expect("sample document should load")
}

/// The sample hero.
///
/// # Panics
///
/// Panics if the sample document fails to load.
#[must_use]
pub fn sample_hero() -> Unit {
    sample_document()
        .get_unit(SAMPLE_HERO)
        .cloned()
        .expect("sample hero should exist")
}

/// The sample document as a mutable key/value tree, for corrupting in tests.
///
/// # Panics
///
/// Panics if the sample text is not JSON.
#[must_use]
pub fn sample_tree() -> serde_json::Value {
    serde_json::from_str(SAMPLE_DOCUMENT).expect("sample document should be JSON")
}

/// A document holding the given units.
#[must_use]
pub fn document_with(units: Vec<Unit>) -> FactionDocument {
    let mut document = FactionDocument::new("Faction de test", "Age of Fantasy");
    document.units = units;
    document
}
