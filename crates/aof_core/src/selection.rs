//! Selections of upgrade options and the legality predicate over them.
//!
//! A [`Selection`] names options per group label. [`resolve_selection`]
//! checks it against a unit and returns the chosen options in declaration
//! order, which both the cost calculator and the profile resolver consume.
//! The presentation order of a selection never affects the outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{Unit, UpgradeGroup, UpgradeOption};
use crate::error::{CatalogError, Result, SelectionFault};

/// Options chosen for one unit, keyed by upgrade group label.
///
/// Picks are kept as given, duplicates included, so that legality
/// checking can reject an option chosen twice.
///
/// # Example JSON
///
/// ```json
/// { "Option": ["Manticore", "Marauder (Aura de combat imprévisible)"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    picks: BTreeMap<String, Vec<String>>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Selection::add`].
    #[must_use]
    pub fn with(mut self, group: impl Into<String>, option: impl Into<String>) -> Self {
        self.add(group, option);
        self
    }

    /// Pick an option of a group.
    pub fn add(&mut self, group: impl Into<String>, option: impl Into<String>) {
        self.picks
            .entry(group.into())
            .or_default()
            .push(option.into());
    }

    /// Options picked in a group, in the order given.
    #[must_use]
    pub fn picks(&self, group: &str) -> &[String] {
        self.picks.get(group).map_or(&[], Vec::as_slice)
    }

    /// Iterate over `(group, picks)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.picks
            .iter()
            .map(|(group, picks)| (group.as_str(), picks.as_slice()))
    }

    /// Total number of picks across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.picks.values().map(Vec::len).sum()
    }

    /// True when nothing is picked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<G, O> FromIterator<(G, O)> for Selection
where
    G: Into<String>,
    O: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (G, O)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (group, option) in iter {
            selection.add(group, option);
        }
        selection
    }
}

/// A legal option choice, borrowed from the unit.
#[derive(Debug, Clone, Copy)]
pub struct ChosenOption<'a> {
    /// Group the option belongs to.
    pub group: &'a UpgradeGroup,
    /// The chosen option.
    pub option: &'a UpgradeOption,
}

/// Check a selection against a unit.
///
/// On success the chosen options are returned ordered by group
/// declaration, then by option declaration within the group.
///
/// # Errors
///
/// - [`CatalogError::IllegalSelection`] when a group label or option name
///   is unknown, an option is picked twice, or a group's cardinality is
///   not respected.
/// - [`CatalogError::ConflictingMounts`] when more than one chosen option
///   carries a mount.
pub fn resolve_selection<'a>(
    unit: &'a Unit,
    selection: &Selection,
) -> Result<Vec<ChosenOption<'a>>> {
    for (label, _) in selection.iter() {
        if unit.get_group(label).is_none() {
            return Err(CatalogError::illegal(label, None, SelectionFault::UnknownGroup));
        }
    }

    let mut chosen = Vec::new();
    for group in &unit.upgrade_groups {
        let picks = selection.picks(&group.group);
        let mut indices = Vec::with_capacity(picks.len());

        for pick in picks {
            let index = group.option_index(pick).ok_or_else(|| {
                CatalogError::illegal(
                    &group.group,
                    Some(pick.as_str()),
                    SelectionFault::UnknownOption(pick.clone()),
                )
            })?;
            if indices.contains(&index) {
                return Err(CatalogError::illegal(
                    &group.group,
                    Some(pick.as_str()),
                    SelectionFault::DuplicateOption(pick.clone()),
                ));
            }
            indices.push(index);
        }

        if let Some(allowed) = group.cardinality.max_choices() {
            if indices.len() > allowed {
                return Err(CatalogError::illegal(
                    &group.group,
                    None,
                    SelectionFault::TooManyOptions {
                        allowed,
                        selected: indices.len(),
                    },
                ));
            }
        }
        if indices.len() < group.cardinality.min_choices() {
            return Err(CatalogError::illegal(
                &group.group,
                None,
                SelectionFault::MissingChoice,
            ));
        }

        indices.sort_unstable();
        chosen.extend(indices.into_iter().map(|i| ChosenOption {
            group,
            option: &group.options[i],
        }));
    }

    let mounts: Vec<String> = chosen
        .iter()
        .filter(|c| c.option.has_mount())
        .map(|c| c.option.name.clone())
        .collect();
    if mounts.len() > 1 {
        return Err(CatalogError::ConflictingMounts { mounts });
    }

    tracing::debug!(
        "Selection for '{}' resolved to {} option(s)",
        unit.name,
        chosen.len()
    );

    Ok(chosen)
}

/// Check if a selection is legal for a unit.
#[must_use]
pub fn is_legal(unit: &Unit, selection: &Selection) -> bool {
    resolve_selection(unit, selection).is_ok()
}
