//! Plain-text reports for the command-line tools.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use aof_core::army::{ArmyEvaluation, ArmyList};
use aof_core::cost::CostBreakdown;
use aof_core::data::{FactionDocument, Unit, Weapon};
use aof_core::profile::EffectiveProfile;
use aof_core::query::{list_options, list_units};

/// One line per unit: name, type, points, quality and defense.
#[must_use]
pub fn format_units(document: &FactionDocument) -> String {
    let mut out = format!("{} ({})\n", document.faction, document.game);
    for summary in list_units(document) {
        let _ = writeln!(
            out,
            "  {:<32} {:<10} {:>4} pts  Q{}+ D{}+  {} option(s)",
            summary.name,
            summary.unit_type,
            summary.base_cost,
            summary.quality,
            summary.defense,
            summary.option_count
        );
    }
    out
}

/// Upgrade menus of a unit, grouped by label.
#[must_use]
pub fn format_options(unit: &Unit) -> String {
    let mut out = format!("{}\n", unit.name);
    let mut current: Option<&str> = None;
    for entry in list_options(unit) {
        if current != Some(entry.group) {
            let _ = writeln!(out, "  {} [{}]", entry.group, entry.cardinality.as_str());
            current = Some(entry.group);
        }
        let _ = write!(out, "    {:<40} +{} pts", entry.option.name, entry.option.cost);
        if let Some(mount) = &entry.option.mount {
            let _ = write!(out, "  (mount: {})", mount.name);
        }
        out.push('\n');
    }
    if current.is_none() {
        out.push_str("  no upgrades\n");
    }
    out
}

/// Itemized cost with a total line.
#[must_use]
pub fn format_cost(unit: &Unit, breakdown: &CostBreakdown) -> String {
    let mut out = format!("{}\n  {:<48} {:>4}\n", unit.name, "base", breakdown.base_cost);
    for (group, option, cost) in &breakdown.upgrades {
        let label = format!("{group} / {option}");
        let _ = writeln!(out, "  {label:<48} {cost:>4}");
    }
    let _ = writeln!(out, "  {:<48} {:>4}", "total", breakdown.total());
    out
}

fn format_rules(rules: &BTreeSet<String>) -> String {
    if rules.is_empty() {
        "-".to_string()
    } else {
        rules.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn format_weapon(weapon: &Weapon) -> String {
    let mut line = format!("{} ({}, A{}", weapon.name, weapon.range, weapon.attacks);
    if weapon.armor_piercing > 0 {
        let _ = write!(line, ", AP({})", weapon.armor_piercing);
    }
    for rule in &weapon.special_rules {
        let _ = write!(line, ", {rule}");
    }
    line.push(')');
    line
}

/// Effective profile with rules and weapons.
#[must_use]
pub fn format_profile(profile: &EffectiveProfile) -> String {
    let mut out = format!(
        "{} [{}]  Q{}+ D{}+\n",
        profile.unit, profile.unit_type, profile.quality, profile.defense
    );
    if let Some(mount) = &profile.mount {
        let _ = writeln!(out, "  Mount:   {mount}");
    }
    let _ = writeln!(out, "  Rules:   {}", format_rules(&profile.special_rules));
    for weapon in &profile.weapons {
        let _ = writeln!(out, "  Weapon:  {}", format_weapon(weapon));
    }
    out
}

/// Army list entries with their costs and a total.
#[must_use]
pub fn format_army(list: &ArmyList, evaluation: &ArmyEvaluation) -> String {
    let mut out = format!("{} - {}\n", list.name, list.faction);
    for (entry, evaluated) in list.entries.iter().zip(&evaluation.entries) {
        let _ = write!(out, "  {:<40} {:>4}", entry.unit, evaluated.cost);
        if let Some(mount) = &evaluated.profile.mount {
            let _ = write!(out, "  (on {mount})");
        }
        out.push('\n');
    }
    match list.points_limit {
        Some(limit) => {
            let _ = writeln!(out, "  {:<40} {:>4} / {limit}", "total", evaluation.total);
        }
        None => {
            let _ = writeln!(out, "  {:<40} {:>4}", "total", evaluation.total);
        }
    }
    out
}
