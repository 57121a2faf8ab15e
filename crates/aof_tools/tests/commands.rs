//! Subcommands run against the sample faction document.

use std::fs;
use std::path::PathBuf;

use aof_core::error::{CatalogError, SelectionFault};
use aof_core::loader::LoadOptions;
use aof_test_utils::fixtures::{sample_data_dir, MANTICORE, MARAUDER, SAMPLE_GROUP, SAMPLE_HERO};
use aof_tools::commands;
use aof_tools::pick::Pick;
use tempfile::TempDir;

fn sample_file() -> PathBuf {
    sample_data_dir().join("disciples_de_la_guerre.json")
}

fn pick(option: &str) -> Pick {
    Pick {
        group: SAMPLE_GROUP.to_string(),
        option: option.to_string(),
    }
}

#[test]
fn test_units_lists_hero() {
    let text = commands::units(&sample_file(), &LoadOptions::strict()).unwrap();
    assert!(text.starts_with("Disciples de la Guerre (Age of Fantasy)"));
    assert!(text.contains(SAMPLE_HERO));
    assert!(text.contains("60 pts"));
}

#[test]
fn test_options_lists_menu() {
    let text = commands::options(&sample_file(), SAMPLE_HERO, &LoadOptions::default()).unwrap();
    assert!(text.contains("Option [multiple]"));
    assert!(text.contains("(mount: Manticore)"));

    let missing = commands::options(&sample_file(), "Chevalier", &LoadOptions::default());
    assert!(matches!(missing, Err(CatalogError::NotFound(_))));
}

#[test]
fn test_cost_with_picks() {
    let picks = [pick(MARAUDER), pick(MANTICORE)];
    let text = commands::cost(&sample_file(), SAMPLE_HERO, &picks, &LoadOptions::default())
        .unwrap();
    assert!(text.trim_end().ends_with("265"));
}

#[test]
fn test_cost_rejects_duplicate_pick() {
    let picks = [pick(MANTICORE), pick(MANTICORE)];
    let result = commands::cost(&sample_file(), SAMPLE_HERO, &picks, &LoadOptions::default());
    assert!(matches!(
        result,
        Err(CatalogError::IllegalSelection {
            fault: SelectionFault::DuplicateOption(_),
            ..
        })
    ));
}

#[test]
fn test_profile_shows_mount() {
    let picks = [pick(MANTICORE)];
    let text = commands::profile(&sample_file(), SAMPLE_HERO, &picks, &LoadOptions::default())
        .unwrap();
    assert!(text.contains("Mount:   Manticore"));
    assert!(text.contains("Coriace (9)"));
}

#[test]
fn test_army_from_file() {
    let dir = TempDir::new().unwrap();
    let army = dir.path().join("ost.json");
    let list = serde_json::json!({
        "name": "Ost de la Manticore",
        "faction": "Disciples de la Guerre",
        "points_limit": 400,
        "entries": [
            { "unit": SAMPLE_HERO, "selection": { SAMPLE_GROUP: [MANTICORE] } },
            { "unit": SAMPLE_HERO }
        ]
    });
    fs::write(&army, list.to_string()).unwrap();

    let text = commands::army(&sample_file(), &army, &LoadOptions::default()).unwrap();
    assert!(text.contains("(on Manticore)"));
    assert!(text.contains("315 / 400"));
}

#[test]
fn test_army_over_limit() {
    let dir = TempDir::new().unwrap();
    let army = dir.path().join("ost.json");
    let list = serde_json::json!({
        "name": "Ost",
        "faction": "Disciples de la Guerre",
        "points_limit": 100,
        "entries": [{ "unit": SAMPLE_HERO, "selection": { SAMPLE_GROUP: [MANTICORE] } }]
    });
    fs::write(&army, list.to_string()).unwrap();

    let result = commands::army(&sample_file(), &army, &LoadOptions::default());
    assert!(matches!(
        result,
        Err(CatalogError::ArmyOverLimit {
            total: 255,
            limit: 100
        })
    ));
}
