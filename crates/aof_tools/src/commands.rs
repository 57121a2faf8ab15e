//! Subcommand bodies. Each returns the text the binary prints.

use std::path::Path;

use aof_core::army::ArmyList;
use aof_core::cost::cost_breakdown;
use aof_core::data::FactionDocument;
use aof_core::error::Result;
use aof_core::loader::{load_document_from_file, LoadOptions};
use aof_core::profile::resolve_profile;
use aof_core::query::find_unit;

use crate::pick::{selection_from_picks, Pick};
use crate::report;

fn load(file: &Path, options: &LoadOptions) -> Result<FactionDocument> {
    tracing::info!("Loading {}", file.display());
    load_document_from_file(file, options)
}

/// `units FILE`
///
/// # Errors
///
/// Returns any load error.
pub fn units(file: &Path, options: &LoadOptions) -> Result<String> {
    let document = load(file, options)?;
    Ok(report::format_units(&document))
}

/// `options FILE UNIT`
///
/// # Errors
///
/// Returns any load error, or [`aof_core::error::CatalogError::NotFound`].
pub fn options(file: &Path, unit: &str, options: &LoadOptions) -> Result<String> {
    let document = load(file, options)?;
    Ok(report::format_options(find_unit(&document, unit)?))
}

/// `cost FILE UNIT [--select GROUP=OPTION]...`
///
/// # Errors
///
/// Returns load, lookup or selection legality errors.
pub fn cost(file: &Path, unit: &str, picks: &[Pick], options: &LoadOptions) -> Result<String> {
    let document = load(file, options)?;
    let unit = find_unit(&document, unit)?;
    let breakdown = cost_breakdown(unit, &selection_from_picks(picks))?;
    Ok(report::format_cost(unit, &breakdown))
}

/// `profile FILE UNIT [--select GROUP=OPTION]...`
///
/// # Errors
///
/// Returns load, lookup or selection legality errors.
pub fn profile(file: &Path, unit: &str, picks: &[Pick], options: &LoadOptions) -> Result<String> {
    let document = load(file, options)?;
    let unit = find_unit(&document, unit)?;
    let profile = resolve_profile(unit, &selection_from_picks(picks))?;
    Ok(report::format_profile(&profile))
}

/// `army FILE ARMY`
///
/// # Errors
///
/// Returns load errors for either file, or any evaluation error.
pub fn army(file: &Path, army: &Path, options: &LoadOptions) -> Result<String> {
    let document = load(file, options)?;
    let list = ArmyList::from_file(army)?;
    let evaluation = list.evaluate(&document)?;
    Ok(report::format_army(&list, &evaluation))
}
