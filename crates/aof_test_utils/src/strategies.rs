//! Proptest strategies for catalog testing.
//!
//! These strategies generate well-formed units together with legal
//! selections, for checking properties of cost and profile resolution.

use std::collections::BTreeSet;

use aof_core::data::{Cardinality, Mount, Range, Unit, UpgradeGroup, UpgradeOption, Weapon};
use aof_core::selection::Selection;
use proptest::prelude::*;

/// Rule tokens used by generated entities.
pub const RULE_POOL: &[&str] = &[
    "Héros",
    "Peur",
    "Vol",
    "Coriace (3)",
    "Coriace (9)",
    "Furieux",
    "Éclaireur",
    "Attaque mortelle",
];

/// Generate a legal quality or defense value.
pub fn arb_stat() -> impl Strategy<Value = u8> {
    2u8..=6u8
}

/// Generate a set of rule tokens drawn from [`RULE_POOL`].
pub fn arb_rule_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(RULE_POOL.to_vec(), 0..4)
        .prop_map(|rules| rules.into_iter().map(str::to_string).collect())
}

/// Generate a weapon range.
pub fn arb_range() -> impl Strategy<Value = Range> {
    prop_oneof![Just(Range::Melee), (1u32..=36u32).prop_map(Range::Distance)]
}

/// Generate a weapon with the given name.
pub fn arb_weapon(name: String) -> impl Strategy<Value = Weapon> {
    (arb_range(), 1u32..=6u32, 0u32..=4u32).prop_map(move |(range, attacks, ap)| {
        Weapon::new(name.clone(), range, attacks).with_armor_piercing(ap)
    })
}

/// Generate any cardinality.
pub fn arb_cardinality() -> impl Strategy<Value = Cardinality> {
    proptest::sample::select(Cardinality::ALL.to_vec())
}

/// Shape of a generated option before names are assigned.
#[derive(Debug, Clone)]
struct OptionShape {
    cost: u32,
    rules: BTreeSet<String>,
    weapon: Option<Weapon>,
    mount_rules: Option<BTreeSet<String>>,
}

fn arb_option_shape(allow_mount: bool) -> impl Strategy<Value = OptionShape> {
    let mount = if allow_mount {
        proptest::option::of(arb_rule_set()).boxed()
    } else {
        Just(None::<BTreeSet<String>>).boxed()
    };
    (
        0u32..=200u32,
        arb_rule_set(),
        proptest::option::of(arb_weapon("Arme d'option".to_string())),
        mount,
    )
        .prop_map(|(cost, rules, weapon, mount_rules)| OptionShape {
            cost,
            rules,
            weapon,
            mount_rules,
        })
}

fn arb_group_shape() -> impl Strategy<Value = (Cardinality, Vec<OptionShape>)> {
    arb_cardinality().prop_flat_map(|cardinality| {
        // Mounts only appear in `multiple` groups, so a legal selection
        // always exists.
        let allow_mount = cardinality == Cardinality::Multiple;
        (
            Just(cardinality),
            proptest::collection::vec(arb_option_shape(allow_mount), 1..5),
        )
    })
}

fn build_group(index: usize, cardinality: Cardinality, shapes: Vec<OptionShape>) -> UpgradeGroup {
    let options = shapes
        .into_iter()
        .enumerate()
        .map(|(i, shape)| {
            let mut option = UpgradeOption::new(format!("Option {index}.{i}"), shape.cost);
            for rule in shape.rules {
                option = option.with_rule(rule);
            }
            if let Some(weapon) = shape.weapon {
                option = option.with_weapon(weapon);
            }
            if let Some(rules) = shape.mount_rules {
                option = option.with_mount(Mount::new(format!("Monture {index}.{i}"), rules));
            }
            option
        })
        .collect();
    UpgradeGroup::new(format!("Groupe {index}"), cardinality, options)
}

/// Generate a valid unit with up to three upgrade groups.
pub fn arb_unit() -> impl Strategy<Value = Unit> {
    (
        arb_stat(),
        arb_stat(),
        0u32..=500u32,
        arb_rule_set(),
        arb_weapon("Arme".to_string()),
        proptest::collection::vec(arb_group_shape(), 0..4),
    )
        .prop_map(|(quality, defense, base_cost, rules, weapon, groups)| {
            let mut unit = Unit::new(
                "Unité générée",
                "Infantry",
                base_cost,
                quality,
                defense,
                weapon,
            );
            unit.special_rules = rules;
            unit.upgrade_groups = groups
                .into_iter()
                .enumerate()
                .map(|(i, (cardinality, shapes))| build_group(i, cardinality, shapes))
                .collect();
            unit
        })
}

fn arb_group_picks(group: &UpgradeGroup) -> BoxedStrategy<Vec<usize>> {
    let n = group.options.len();
    let indices: Vec<usize> = (0..n).collect();
    match group.cardinality {
        Cardinality::One | Cardinality::UpgradeAll => proptest::option::of(0..n)
            .prop_map(|pick| pick.into_iter().collect::<Vec<_>>())
            .boxed(),
        Cardinality::Multiple => proptest::sample::subsequence(indices, 0..=n).boxed(),
        Cardinality::OneOrMore => proptest::sample::subsequence(indices, 1..=n).boxed(),
    }
}

/// Generate `(group, option)` picks forming a legal selection for `unit`.
pub fn arb_legal_picks(unit: &Unit) -> impl Strategy<Value = Vec<(String, String)>> {
    let groups = unit.upgrade_groups.clone();
    let per_group: Vec<BoxedStrategy<Vec<usize>>> = groups.iter().map(arb_group_picks).collect();

    per_group.prop_map(move |chosen| {
        let mut mounted = false;
        let mut picks = Vec::new();
        for (group, indices) in groups.iter().zip(chosen) {
            for index in indices {
                let option = &group.options[index];
                if option.has_mount() {
                    if mounted {
                        continue;
                    }
                    mounted = true;
                }
                picks.push((group.group.clone(), option.name.clone()));
            }
        }
        picks
    })
}

/// Generate a unit with a legal selection.
pub fn arb_unit_with_selection() -> impl Strategy<Value = (Unit, Selection)> {
    arb_unit().prop_flat_map(|unit| {
        let picks = arb_legal_picks(&unit);
        (Just(unit), picks.prop_map(|p| p.into_iter().collect::<Selection>()))
    })
}

/// Generate a unit, legal picks, and the same picks in shuffled order.
pub fn arb_unit_with_shuffled_picks(
) -> impl Strategy<Value = (Unit, Vec<(String, String)>, Vec<(String, String)>)> {
    arb_unit()
        .prop_flat_map(|unit| {
            let picks = arb_legal_picks(&unit);
            (Just(unit), picks)
        })
        .prop_flat_map(|(unit, picks)| {
            (Just(unit), Just(picks.clone()), Just(picks).prop_shuffle())
        })
}
