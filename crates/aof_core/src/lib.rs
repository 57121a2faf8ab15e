//! # AoF Core
//!
//! Typed model of an Age of Fantasy faction catalog.
//!
//! This crate loads a faction document, validates it against the schema,
//! and answers the questions army builders ask of it:
//! - What units exist and what do their upgrade menus offer?
//! - What does a unit cost with a given selection of upgrades?
//! - What is its effective profile (rules, weapons, mount) once upgraded?
//!
//! Everything is immutable after load. All operations are pure functions
//! of their inputs, so a loaded [`data::FactionDocument`] can be shared
//! across threads without synchronization.
//!
//! ## Crate Structure
//!
//! - [`data`] - Entity model (units, weapons, upgrade groups, mounts)
//! - [`loader`] - Parsing and schema validation
//! - [`selection`] - Selections and their legality predicate
//! - [`cost`] - Point cost calculation
//! - [`profile`] - Effective profile resolution
//! - [`query`] - Read-only accessors
//! - [`registry`] - Multi-faction data directories
//! - [`army`] - Army lists

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod army;
pub mod cost;
pub mod data;
pub mod error;
pub mod loader;
pub mod profile;
pub mod query;
pub mod registry;
mod schema;
pub mod selection;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::army::{ArmyEntry, ArmyEvaluation, ArmyList};
    pub use crate::cost::{cost_breakdown, total_cost, CostBreakdown};
    pub use crate::data::{
        Cardinality, FactionDocument, Mount, Range, Unit, UpgradeGroup, UpgradeOption, Weapon,
    };
    pub use crate::error::{
        CatalogError, Result, Rule, SchemaViolation, SelectionFault, ValidationReport,
    };
    pub use crate::loader::{
        load_document_from_file, load_document_from_reader, load_document_from_str,
        load_document_from_value, DocumentFormat, LoadOptions, Strictness,
    };
    pub use crate::profile::{resolve_profile, EffectiveProfile};
    pub use crate::query::{find_unit, list_options, list_units, OptionEntry, UnitSummary};
    pub use crate::registry::{load_factions_from_directory, FactionRegistry};
    pub use crate::selection::{is_legal, resolve_selection, Selection};
}
