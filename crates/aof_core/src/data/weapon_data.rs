//! Weapon profiles and range encoding.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text sentinel for melee weapons.
pub const MELEE_SENTINEL: &str = "-";

/// Weapon reach: melee, or a positive distance in game units.
///
/// Serialized as `"-"` for melee and as a number otherwise. A digit-only
/// string such as `"18"` is also accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    /// Close combat only.
    Melee,
    /// Shooting range in game units (always positive).
    Distance(u32),
}

impl Range {
    /// Parse a text token: the melee sentinel or a digit-only positive integer.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        if token == MELEE_SENTINEL {
            return Some(Self::Melee);
        }
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match token.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(Self::Distance(n)),
        }
    }

    /// Build a range from a numeric literal; zero and negatives are rejected.
    #[must_use]
    pub fn from_number(n: i64) -> Option<Self> {
        u32::try_from(n)
            .ok()
            .filter(|n| *n > 0)
            .map(Self::Distance)
    }

    /// Check if this is a melee weapon.
    #[must_use]
    pub const fn is_melee(&self) -> bool {
        matches!(self, Self::Melee)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melee => f.write_str(MELEE_SENTINEL),
            Self::Distance(n) => write!(f, "{n}\""),
        }
    }
}

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Melee => serializer.serialize_str(MELEE_SENTINEL),
            Self::Distance(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RangeVisitor;

        impl Visitor<'_> for RangeVisitor {
            type Value = Range;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"-\" or a positive integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Range, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(Range::from_number)
                    .ok_or_else(|| E::custom(format!("invalid range {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Range, E> {
                Range::from_number(v).ok_or_else(|| E::custom(format!("invalid range {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Range, E> {
                Range::parse(v).ok_or_else(|| E::custom(format!("invalid range '{v}'")))
            }
        }

        deserializer.deserialize_any(RangeVisitor)
    }
}

/// A weapon carried by a unit, granted by an option, or borne by a mount.
///
/// # Example JSON
///
/// ```json
/// { "name": "Arme lourde", "range": "-", "attacks": 4, "armor_piercing": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name.
    pub name: String,

    /// Melee or shooting range.
    pub range: Range,

    /// Number of attack dice (at least 1).
    pub attacks: u32,

    /// Armor piercing value, 0 when omitted.
    #[serde(default)]
    pub armor_piercing: u32,

    /// Weapon special rules, empty when omitted.
    #[serde(default)]
    pub special_rules: BTreeSet<String>,

    /// Keys outside the schema, kept by tolerant loading.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Weapon {
    /// Create a weapon with no armor piercing and no special rules.
    #[must_use]
    pub fn new(name: impl Into<String>, range: Range, attacks: u32) -> Self {
        Self {
            name: name.into(),
            range,
            attacks,
            armor_piercing: 0,
            special_rules: BTreeSet::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Set the armor piercing value.
    #[must_use]
    pub fn with_armor_piercing(mut self, ap: u32) -> Self {
        self.armor_piercing = ap;
        self
    }

    /// Add a special rule token.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.special_rules.insert(rule.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_parse() {
        assert_eq!(Range::parse("-"), Some(Range::Melee));
        assert_eq!(Range::parse("18"), Some(Range::Distance(18)));
        assert_eq!(Range::parse("0"), None);
        assert_eq!(Range::parse("12\""), None);
        assert_eq!(Range::parse("+3"), None);
        assert_eq!(Range::parse(""), None);
    }

    #[test]
    fn test_range_from_number() {
        assert_eq!(Range::from_number(24), Some(Range::Distance(24)));
        assert_eq!(Range::from_number(0), None);
        assert_eq!(Range::from_number(-6), None);
    }

    #[test]
    fn test_range_serde() {
        let melee = serde_json::to_value(Range::Melee).unwrap();
        assert_eq!(melee, serde_json::json!("-"));

        let shooting = serde_json::to_value(Range::Distance(18)).unwrap();
        assert_eq!(shooting, serde_json::json!(18));

        let from_text: Range = serde_json::from_value(serde_json::json!("24")).unwrap();
        assert_eq!(from_text, Range::Distance(24));
    }

    #[test]
    fn test_weapon_defaults() {
        let weapon: Weapon = serde_json::from_value(serde_json::json!({
            "name": "Griffes",
            "range": "-",
            "attacks": 3
        }))
        .unwrap();

        assert!(weapon.range.is_melee());
        assert_eq!(weapon.armor_piercing, 0);
        assert!(weapon.special_rules.is_empty());
    }
}
