//! Entity model of a faction document.
//!
//! This module contains pure data structures for units, weapons and
//! upgrade menus. All structs serialize to the canonical document form.
//!
//! **Note:** Deserializing these types directly skips the schema rules.
//! Use [`crate::loader`] to get a validated [`FactionDocument`].

mod document;
mod unit_data;
mod upgrade_data;
mod weapon_data;

pub use document::FactionDocument;
pub use unit_data::{Unit, MAX_STAT, MIN_STAT};
pub use upgrade_data::{Cardinality, Mount, UpgradeGroup, UpgradeOption};
pub use weapon_data::{Range, Weapon, MELEE_SENTINEL};
