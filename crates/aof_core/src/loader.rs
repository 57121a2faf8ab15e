//! Document loading: format detection, parsing and schema validation.
//!
//! Every entry point ends in [`load_document_from_value`], which walks the
//! parsed tree and either returns a validated [`FactionDocument`] or a
//! [`CatalogError::Schema`] listing every violation found.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::FactionDocument;
use crate::error::{CatalogError, Result};
use crate::schema;

/// How unknown keys are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Keep unknown keys in each entity's `extra` map.
    #[default]
    Tolerant,
    /// Report each unknown key as a violation.
    Strict,
}

/// Options controlling a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Unknown-key policy.
    #[serde(default)]
    pub strictness: Strictness,
}

impl LoadOptions {
    /// Options that reject unknown keys.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }

    /// Check if unknown keys are rejected.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self.strictness, Strictness::Strict)
    }
}

/// Supported source text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// RON text using map syntax.
    Ron,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("ron") => Some(Self::Ron),
            _ => None,
        }
    }

    /// Parse text into a key/value tree.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the text is malformed.
    pub fn parse(self, text: &str, origin: &str) -> Result<serde_json::Value> {
        let parsed = match self {
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| CatalogError::Parse {
            origin: origin.to_string(),
            format: self.to_string(),
            message,
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Ron => f.write_str("RON"),
        }
    }
}

/// Validate an already-parsed key/value tree.
///
/// # Errors
///
/// Returns [`CatalogError::Schema`] with every violation found.
pub fn load_document_from_value(
    tree: &serde_json::Value,
    options: &LoadOptions,
) -> Result<FactionDocument> {
    let document = schema::build_document(tree, options).map_err(CatalogError::Schema)?;

    tracing::info!(
        "Loaded faction '{}' ({}) with {} units",
        document.faction,
        document.game,
        document.units.len()
    );
    for unit in &document.units {
        tracing::debug!(
            "Unit '{}' ({}): {} pts, {} weapons, {} upgrade groups",
            unit.name,
            unit.unit_type,
            unit.base_cost,
            unit.weapons.len(),
            unit.upgrade_groups.len()
        );
    }

    Ok(document)
}

/// Parse and validate a document held in memory.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for malformed text and
/// [`CatalogError::Schema`] for schema violations.
pub fn load_document_from_str(
    text: &str,
    format: DocumentFormat,
    options: &LoadOptions,
) -> Result<FactionDocument> {
    let tree = format.parse(text, "<memory>")?;
    load_document_from_value(&tree, options)
}

/// Read, parse and validate a document from a byte stream.
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if reading fails, [`CatalogError::Parse`]
/// if the bytes are not UTF-8 or not well-formed, and
/// [`CatalogError::Schema`] for schema violations.
pub fn load_document_from_reader<R: Read>(
    mut reader: R,
    format: DocumentFormat,
    origin: &str,
    options: &LoadOptions,
) -> Result<FactionDocument> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| CatalogError::Io {
            path: origin.to_string(),
            source: e,
        })?;

    let text = String::from_utf8(bytes).map_err(|e| CatalogError::Parse {
        origin: origin.to_string(),
        format: format.to_string(),
        message: format!("not valid UTF-8: {e}"),
    })?;

    let tree = format.parse(&text, origin)?;
    load_document_from_value(&tree, options)
}

/// Load a document from a `.json` or `.ron` file.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for an unsupported extension, plus the
/// errors of [`load_document_from_reader`].
pub fn load_document_from_file(path: &Path, options: &LoadOptions) -> Result<FactionDocument> {
    let path_str = path.display().to_string();

    let format = DocumentFormat::from_path(path).ok_or_else(|| CatalogError::Parse {
        origin: path_str.clone(),
        format: "unknown".to_string(),
        message: "expected a .json or .ron file".to_string(),
    })?;

    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path_str.clone(),
        source: e,
    })?;

    load_document_from_reader(file, format, &path_str, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rule;

    const MINIMAL_JSON: &str = r#"{
        "faction": "Disciples de la Guerre",
        "game": "Age of Fantasy",
        "units": []
    }"#;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("b.ron")),
            Some(DocumentFormat::Ron)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("b.yaml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("json")), None);
    }

    #[test]
    fn test_load_empty_unit_list() {
        let doc =
            load_document_from_str(MINIMAL_JSON, DocumentFormat::Json, &LoadOptions::default())
                .unwrap();
        assert!(doc.units.is_empty());
    }

    #[test]
    fn test_load_ron_map_syntax() {
        let text = r#"{
            "faction": "Disciples de la Guerre",
            "game": "Age of Fantasy",
            "units": [],
        }"#;
        let doc = load_document_from_str(text, DocumentFormat::Ron, &LoadOptions::default())
            .unwrap();
        assert_eq!(doc.faction, "Disciples de la Guerre");
    }

    #[test]
    fn test_malformed_text_is_parse_error() {
        let result = load_document_from_str(
            "{ \"faction\": ",
            DocumentFormat::Json,
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0x7b, 0xff, 0xfe, 0x7d];
        let result = load_document_from_reader(
            bytes,
            DocumentFormat::Json,
            "bytes",
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_schema_error_from_str() {
        let text = r#"{ "faction": "", "game": "Age of Fantasy", "units": [] }"#;
        let err = load_document_from_str(text, DocumentFormat::Json, &LoadOptions::default())
            .unwrap_err();

        match err {
            CatalogError::Schema(report) => assert!(report.contains("faction", Rule::EmptyValue)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_document_from_file(Path::new("faction.yaml"), &LoadOptions::default());
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_document_from_file(
            Path::new("does/not/exist.json"),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
