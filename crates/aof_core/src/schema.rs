//! Schema walker: turns a parsed key/value tree into the entity model.
//!
//! The walker never stops at the first problem. Every violation is
//! recorded with its path and the walk continues with the sibling
//! fields, so a single load reports as much as possible. An entity is
//! only built when all of its own fields checked out.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use crate::data::{
    Cardinality, FactionDocument, Mount, Range, Unit, UpgradeGroup, UpgradeOption, Weapon,
    MAX_STAT, MIN_STAT,
};
use crate::error::{Rule, ValidationReport};
use crate::loader::LoadOptions;

const DOCUMENT_KEYS: &[&str] = &["faction", "game", "units"];
const UNIT_KEYS: &[&str] = &[
    "name",
    "type",
    "base_cost",
    "quality",
    "defense",
    "special_rules",
    "weapons",
    "upgrade_groups",
];
const WEAPON_KEYS: &[&str] = &["name", "range", "attacks", "armor_piercing", "special_rules"];
const GROUP_KEYS: &[&str] = &["group", "type", "options"];
const OPTION_KEYS: &[&str] = &["name", "cost", "special_rules", "weapons", "mount"];
const MOUNT_KEYS: &[&str] = &["name", "special_rules", "quality", "defense", "weapons"];

/// Walk `tree` and build a document, or return every violation found.
pub(crate) fn build_document(
    tree: &Value,
    options: &LoadOptions,
) -> Result<FactionDocument, ValidationReport> {
    let mut walker = SchemaWalker {
        options,
        report: ValidationReport::new(),
    };

    let document = walker.document(tree);
    match document {
        Some(doc) if walker.report.is_empty() => Ok(doc),
        _ => Err(walker.report),
    }
}

fn key_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn index_path(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a fractional number",
        Value::Number(_) => "an integer",
        Value::String(_) => "text",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}

struct SchemaWalker<'o> {
    options: &'o LoadOptions,
    report: ValidationReport,
}

impl SchemaWalker<'_> {
    // =====================================================================
    // Primitive checks
    // =====================================================================

    fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        if let Value::Object(map) = value {
            Some(map)
        } else {
            self.report.push(
                path,
                Rule::WrongType,
                format!("expected an object, found {}", kind(value)),
            );
            None
        }
    }

    fn required<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'v Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.report.push(
                key_path(path, key),
                Rule::MissingKey,
                format!("required key '{key}' is missing"),
            );
        }
        value
    }

    fn text(&mut self, value: &Value, path: &str) -> Option<String> {
        match value {
            Value::String(s) if s.is_empty() => {
                self.report.push(path, Rule::EmptyValue, "text must not be empty");
                None
            }
            Value::String(s) => Some(s.clone()),
            other => {
                self.report.push(
                    path,
                    Rule::WrongType,
                    format!("expected text, found {}", kind(other)),
                );
                None
            }
        }
    }

    fn required_text(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<String> {
        let value = self.required(obj, path, key)?;
        self.text(value, &key_path(path, key))
    }

    fn integer(&mut self, value: &Value, path: &str, min: i64, max: i64) -> Option<i64> {
        let Value::Number(number) = value else {
            self.report.push(
                path,
                Rule::WrongType,
                format!("expected an integer, found {}", kind(value)),
            );
            return None;
        };

        if number.is_f64() {
            self.report.push(
                path,
                Rule::WrongType,
                format!("expected an integer, found {number}"),
            );
            return None;
        }

        match number.as_i64() {
            Some(n) if n >= min && n <= max => Some(n),
            _ => {
                self.report.push(
                    path,
                    Rule::OutOfRange,
                    format!("{number} is not in [{min}, {max}]"),
                );
                None
            }
        }
    }

    fn required_integer(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
        min: i64,
        max: i64,
    ) -> Option<i64> {
        let value = self.required(obj, path, key)?;
        self.integer(value, &key_path(path, key), min, max)
    }

    fn points(&mut self, obj: &Map<String, Value>, path: &str, key: &str) -> Option<u32> {
        self.required_integer(obj, path, key, 0, i64::from(u32::MAX))
            .and_then(|n| u32::try_from(n).ok())
    }

    fn stat(&mut self, value: &Value, path: &str) -> Option<u8> {
        self.integer(value, path, i64::from(MIN_STAT), i64::from(MAX_STAT))
            .and_then(|n| u8::try_from(n).ok())
    }

    fn sequence<'v>(
        &mut self,
        value: &'v Value,
        path: &str,
        non_empty: bool,
    ) -> Option<&'v Vec<Value>> {
        let Value::Array(items) = value else {
            self.report.push(
                path,
                Rule::WrongType,
                format!("expected a sequence, found {}", kind(value)),
            );
            return None;
        };

        if non_empty && items.is_empty() {
            self.report
                .push(path, Rule::EmptySequence, "at least one entry is required");
            return None;
        }
        Some(items)
    }

    fn rule_set(&mut self, value: &Value, path: &str) -> Option<BTreeSet<String>> {
        let items = self.sequence(value, path, false)?;
        let mut rules = BTreeSet::new();
        let mut valid = true;

        for (i, item) in items.iter().enumerate() {
            let item_path = index_path(path, i);
            match self.text(item, &item_path) {
                Some(rule) if rules.contains(&rule) => {
                    self.report.push(
                        item_path,
                        Rule::DuplicateRule,
                        format!("rule '{rule}' is listed more than once"),
                    );
                    valid = false;
                }
                Some(rule) => {
                    rules.insert(rule);
                }
                None => valid = false,
            }
        }

        valid.then_some(rules)
    }

    /// Optional rule set: `Some(None)` when absent, `None` when invalid.
    fn optional_rule_set(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
    ) -> Option<Option<BTreeSet<String>>> {
        match obj.get("special_rules") {
            None => Some(None),
            Some(value) => self
                .rule_set(value, &key_path(path, "special_rules"))
                .map(Some),
        }
    }

    /// Optional weapon list: `Some(None)` when absent, `None` when invalid.
    fn optional_weapons(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
    ) -> Option<Option<Vec<Weapon>>> {
        match obj.get("weapons") {
            None => Some(None),
            Some(value) => self
                .weapons(value, &key_path(path, "weapons"), false)
                .map(Some),
        }
    }

    /// Optional 2-6 stat: `Some(None)` when absent, `None` when invalid.
    fn optional_stat(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<Option<u8>> {
        match obj.get(key) {
            None => Some(None),
            Some(value) => self.stat(value, &key_path(path, key)).map(Some),
        }
    }

    fn extra(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        known: &[&str],
    ) -> BTreeMap<String, Value> {
        let mut extra = BTreeMap::new();
        for (key, value) in obj {
            if known.contains(&key.as_str()) {
                continue;
            }
            if self.options.is_strict() {
                self.report.push(
                    key_path(path, key),
                    Rule::UnknownKey,
                    format!("key '{key}' is not part of the schema"),
                );
            } else {
                tracing::warn!("Keeping unknown key '{}'", key_path(path, key));
                extra.insert(key.clone(), value.clone());
            }
        }
        extra
    }

    /// Report every entry whose `key` text repeats an earlier entry's.
    fn unique_names(&mut self, items: &[Value], path: &str, key: &str, scope: &str) {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (i, item) in items.iter().enumerate() {
            let Some(name) = item.get(key).and_then(Value::as_str) else {
                continue;
            };
            if let Some(first) = seen.get(name) {
                self.report.push(
                    key_path(&index_path(path, i), key),
                    Rule::DuplicateName,
                    format!(
                        "{scope} '{name}' already declared at {}",
                        index_path(path, *first)
                    ),
                );
            } else {
                seen.insert(name, i);
            }
        }
    }

    // =====================================================================
    // Entities
    // =====================================================================

    fn document(&mut self, tree: &Value) -> Option<FactionDocument> {
        let obj = self.object(tree, "")?;

        let faction = self.required_text(obj, "", "faction");
        let game = self.required_text(obj, "", "game");
        let units = self
            .required(obj, "", "units")
            .and_then(|value| self.sequence(value, "units", false))
            .map(|items| {
                self.unique_names(items, "units", "name", "unit");
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.unit(item, &index_path("units", i)))
                    .collect::<Vec<_>>()
            });
        let extra = self.extra(obj, "", DOCUMENT_KEYS);

        Some(FactionDocument {
            faction: faction?,
            game: game?,
            units: units?.into_iter().collect::<Option<Vec<_>>>()?,
            extra,
        })
    }

    fn unit(&mut self, value: &Value, path: &str) -> Option<Unit> {
        let obj = self.object(value, path)?;

        let name = self.required_text(obj, path, "name");
        let unit_type = self.required_text(obj, path, "type");
        let base_cost = self.points(obj, path, "base_cost");
        let quality = self
            .required(obj, path, "quality")
            .and_then(|v| self.stat(v, &key_path(path, "quality")));
        let defense = self
            .required(obj, path, "defense")
            .and_then(|v| self.stat(v, &key_path(path, "defense")));
        let special_rules = self.optional_rule_set(obj, path);
        let weapons = self
            .required(obj, path, "weapons")
            .and_then(|v| self.weapons(v, &key_path(path, "weapons"), true));
        let upgrade_groups = match obj.get("upgrade_groups") {
            None => Some(Vec::new()),
            Some(v) => self.groups(v, &key_path(path, "upgrade_groups")),
        };
        let extra = self.extra(obj, path, UNIT_KEYS);

        Some(Unit {
            name: name?,
            unit_type: unit_type?,
            base_cost: base_cost?,
            quality: quality?,
            defense: defense?,
            special_rules: special_rules?.unwrap_or_default(),
            weapons: weapons?,
            upgrade_groups: upgrade_groups?,
            extra,
        })
    }

    fn weapons(&mut self, value: &Value, path: &str, non_empty: bool) -> Option<Vec<Weapon>> {
        let items = self.sequence(value, path, non_empty)?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.weapon(item, &index_path(path, i)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    fn weapon(&mut self, value: &Value, path: &str) -> Option<Weapon> {
        let obj = self.object(value, path)?;

        let name = self.required_text(obj, path, "name");
        let range = self
            .required(obj, path, "range")
            .and_then(|v| self.range(v, &key_path(path, "range")));
        let attacks = self
            .required_integer(obj, path, "attacks", 1, i64::from(u32::MAX))
            .and_then(|n| u32::try_from(n).ok());
        let armor_piercing = match obj.get("armor_piercing") {
            None => Some(0),
            Some(v) => self
                .integer(v, &key_path(path, "armor_piercing"), 0, i64::from(u32::MAX))
                .and_then(|n| u32::try_from(n).ok()),
        };
        let special_rules = self.optional_rule_set(obj, path);
        let extra = self.extra(obj, path, WEAPON_KEYS);

        Some(Weapon {
            name: name?,
            range: range?,
            attacks: attacks?,
            armor_piercing: armor_piercing?,
            special_rules: special_rules?.unwrap_or_default(),
            extra,
        })
    }

    fn range(&mut self, value: &Value, path: &str) -> Option<Range> {
        let parsed = match value {
            Value::String(token) => Range::parse(token),
            Value::Number(n) => n.as_i64().and_then(Range::from_number),
            other => {
                self.report.push(
                    path,
                    Rule::WrongType,
                    format!("expected \"-\" or a positive integer, found {}", kind(other)),
                );
                return None;
            }
        };

        if parsed.is_none() {
            self.report.push(
                path,
                Rule::InvalidRange,
                format!("{value} is neither \"-\" nor a positive integer"),
            );
        }
        parsed
    }

    fn groups(&mut self, value: &Value, path: &str) -> Option<Vec<UpgradeGroup>> {
        let items = self.sequence(value, path, false)?;
        self.unique_names(items, path, "group", "upgrade group");
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.group(item, &index_path(path, i)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    fn group(&mut self, value: &Value, path: &str) -> Option<UpgradeGroup> {
        let obj = self.object(value, path)?;

        let group = self.required_text(obj, path, "group");
        let cardinality = self
            .required_text(obj, path, "type")
            .and_then(|token| {
                let parsed = Cardinality::parse(&token);
                if parsed.is_none() {
                    self.report.push(
                        key_path(path, "type"),
                        Rule::UnknownCardinality,
                        format!(
                            "'{token}' is not one of one, multiple, one_or_more, upgrade_all"
                        ),
                    );
                }
                parsed
            });
        let options = self.required(obj, path, "options").and_then(|v| {
            let options_path = key_path(path, "options");
            let items = self.sequence(v, &options_path, true)?;
            self.unique_names(items, &options_path, "name", "option");
            items
                .iter()
                .enumerate()
                .map(|(i, item)| self.option(item, &index_path(&options_path, i)))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Option<Vec<_>>>()
        });
        let extra = self.extra(obj, path, GROUP_KEYS);

        Some(UpgradeGroup {
            group: group?,
            cardinality: cardinality?,
            options: options?,
            extra,
        })
    }

    fn option(&mut self, value: &Value, path: &str) -> Option<UpgradeOption> {
        let obj = self.object(value, path)?;

        let name = self.required_text(obj, path, "name");
        let cost = self.points(obj, path, "cost");
        let special_rules = self.optional_rule_set(obj, path);
        let weapons = self.optional_weapons(obj, path);
        let mount = match obj.get("mount") {
            None => Some(None),
            Some(v) => self.mount(v, &key_path(path, "mount")).map(Some),
        };
        let extra = self.extra(obj, path, OPTION_KEYS);

        Some(UpgradeOption {
            name: name?,
            cost: cost?,
            special_rules: special_rules?,
            weapons: weapons?,
            mount: mount?,
            extra,
        })
    }

    fn mount(&mut self, value: &Value, path: &str) -> Option<Mount> {
        let obj = self.object(value, path)?;

        let name = self.required_text(obj, path, "name");
        let special_rules = self.optional_rule_set(obj, path);
        let quality = self.optional_stat(obj, path, "quality");
        let defense = self.optional_stat(obj, path, "defense");
        let weapons = self.optional_weapons(obj, path);
        let extra = self.extra(obj, path, MOUNT_KEYS);

        Some(Mount {
            name: name?,
            special_rules: special_rules?.unwrap_or_default(),
            quality: quality?,
            defense: defense?,
            weapons: weapons?,
            extra,
        })
    }
}
