//! Error types for catalog loading, selection legality and lookups.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Top-level error type for all catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a data file.
    #[error("Failed to read file '{path}': {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The source text is not a well-formed document in its format.
    #[error("Failed to parse {format} document '{origin}': {message}")]
    Parse {
        /// File path or a description of the in-memory source.
        origin: String,
        /// Format the text was parsed as.
        format: String,
        /// Parser error message.
        message: String,
    },

    /// The document parsed but violates the schema.
    #[error("Schema validation failed with {} violation(s):\n{0}", .0.len())]
    Schema(ValidationReport),

    /// A selection violates a group's cardinality or names an unknown option.
    #[error("Illegal selection in group '{group}': {fault}")]
    IllegalSelection {
        /// Group label the selection addressed.
        group: String,
        /// Offending option, when one is involved.
        option: Option<String>,
        /// What is wrong with the selection.
        fault: SelectionFault,
    },

    /// More than one mount-carrying option was selected.
    #[error("Conflicting mounts selected: {}", .mounts.join(", "))]
    ConflictingMounts {
        /// Names of every selected option carrying a mount.
        mounts: Vec<String>,
    },

    /// Lookup by name failed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Two loaded documents declare the same faction.
    #[error("Duplicate faction: {0}")]
    DuplicateFaction(String),

    /// An army list costs more than its points limit.
    #[error("Army list exceeds its points limit: {total} > {limit}")]
    ArmyOverLimit {
        /// Total cost of the army list.
        total: u64,
        /// Declared points limit.
        limit: u64,
    },
}

/// Reason a selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionFault {
    /// The unit has no upgrade group with the given label.
    #[error("unit has no such upgrade group")]
    UnknownGroup,

    /// The group has no option with the given name.
    #[error("option '{0}' is not offered by this group")]
    UnknownOption(String),

    /// The same option was selected more than once.
    #[error("option '{0}' selected more than once")]
    DuplicateOption(String),

    /// More options were selected than the group's cardinality allows.
    #[error("{selected} options selected, at most {allowed} allowed")]
    TooManyOptions {
        /// Number of options allowed.
        allowed: usize,
        /// Number of options selected.
        selected: usize,
    },

    /// A group that demands a choice has none.
    #[error("at least one option must be selected")]
    MissingChoice,
}

impl CatalogError {
    /// Build an [`CatalogError::IllegalSelection`].
    pub(crate) fn illegal(
        group: impl Into<String>,
        option: Option<&str>,
        fault: SelectionFault,
    ) -> Self {
        Self::IllegalSelection {
            group: group.into(),
            option: option.map(str::to_string),
            fault,
        }
    }
}

/// Schema rule broken by a [`SchemaViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// A required key is absent.
    MissingKey,
    /// A value has the wrong type (e.g. text where an integer is expected).
    WrongType,
    /// A text value is empty.
    EmptyValue,
    /// An integer lies outside its allowed interval.
    OutOfRange,
    /// A weapon range is neither the melee sentinel nor a positive integer.
    InvalidRange,
    /// An upgrade group type is not a recognized cardinality.
    UnknownCardinality,
    /// A sequence that must hold at least one entry is empty.
    EmptySequence,
    /// A name repeats within its scope.
    DuplicateName,
    /// A rule token repeats within one set.
    DuplicateRule,
    /// A key is not part of the schema (strict loading only).
    UnknownKey,
}

impl Rule {
    /// Stable identifier used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingKey => "missing-key",
            Self::WrongType => "wrong-type",
            Self::EmptyValue => "empty-value",
            Self::OutOfRange => "out-of-range",
            Self::InvalidRange => "invalid-range",
            Self::UnknownCardinality => "unknown-cardinality",
            Self::EmptySequence => "empty-sequence",
            Self::DuplicateName => "duplicate-name",
            Self::DuplicateRule => "duplicate-rule",
            Self::UnknownKey => "unknown-key",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation at a document path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    /// Location in the document, e.g. `units[0].upgrade_groups[0].options[2].cost`.
    pub path: String,
    /// Rule that was broken.
    pub rule: Rule,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        write!(f, "{path}: [{}] {}", self.rule, self.message)
    }
}

/// Every violation found by a single load, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<SchemaViolation>,
}

impl ValidationReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, path: impl Into<String>, rule: Rule, message: impl Into<String>) {
        self.violations.push(SchemaViolation {
            path: path.into(),
            rule,
            message: message.into(),
        });
    }

    /// All recorded violations.
    #[must_use]
    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaViolation> {
        self.violations.iter()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// True when a violation of `rule` was recorded at exactly `path`.
    #[must_use]
    pub fn contains(&self, path: &str, rule: Rule) -> bool {
        self.violations
            .iter()
            .any(|v| v.path == path && v.rule == rule)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {violation}")?;
        }
        Ok(())
    }
}
