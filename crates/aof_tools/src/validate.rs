//! Data validation utilities.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use aof_core::error::{CatalogError, Result};
use aof_core::loader::{load_document_from_file, LoadOptions};
use aof_core::registry::data_files_in;

/// Environment variable naming the faction data directory.
pub const DATA_DIR_ENV: &str = "AOF_DATA_DIR";

/// Data directory used when [`DATA_DIR_ENV`] is unset.
pub const DEFAULT_DATA_DIR: &str = "assets/data/factions";

/// Resolve the faction data directory from the environment.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok())
}

/// Resolve the data directory from an optional override.
///
/// Empty overrides fall back to [`DEFAULT_DATA_DIR`].
#[must_use]
pub fn data_dir_from(overridden: Option<String>) -> PathBuf {
    match overridden {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Outcome of validating one data file.
#[derive(Debug)]
pub struct FileOutcome {
    /// File that was checked.
    pub path: PathBuf,
    /// Faction name on success.
    pub result: Result<String>,
}

impl FileOutcome {
    /// Check if the file passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file results of a validation run.
#[derive(Debug, Default)]
pub struct ValidationSummary {
    /// One outcome per file, sorted by path.
    pub outcomes: Vec<FileOutcome>,
}

impl ValidationSummary {
    /// Number of files that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of files that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Check if every file passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failing outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(faction) => writeln!(f, "ok    {} ({faction})", outcome.path.display())?,
                Err(e) => writeln!(f, "FAIL  {}: {e}", outcome.path.display())?,
            }
        }
        write!(
            f,
            "{} file(s) checked, {} passed, {} failed",
            self.outcomes.len(),
            self.passed(),
            self.failed()
        )
    }
}

/// Validate a single data file or every data file in a directory.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the path does not exist, or
/// [`CatalogError::Io`] if a directory cannot be read. Invalid documents
/// are reported in the summary, not as errors.
pub fn validate_path(path: &Path, options: &LoadOptions) -> Result<ValidationSummary> {
    if path.is_dir() {
        validate_data_directory(path, options)
    } else if path.exists() {
        Ok(ValidationSummary {
            outcomes: vec![validate_file(path, options)],
        })
    } else {
        Err(CatalogError::NotFound(format!(
            "data path {}",
            path.display()
        )))
    }
}

/// Validate every JSON and RON data file in a directory.
///
/// Files declaring a faction already seen in an earlier file fail with
/// [`CatalogError::DuplicateFaction`].
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the directory cannot be read.
pub fn validate_data_directory(path: &Path, options: &LoadOptions) -> Result<ValidationSummary> {
    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut summary = ValidationSummary::default();

    for file in data_files_in(path)? {
        let mut outcome = validate_file(&file, options);
        let duplicate = match &outcome.result {
            Ok(faction) => match seen.get(faction) {
                Some(first) => {
                    tracing::warn!(
                        "Faction '{faction}' in {} already declared in {}",
                        file.display(),
                        first.display()
                    );
                    Some(faction.clone())
                }
                None => {
                    seen.insert(faction.clone(), file.clone());
                    None
                }
            },
            Err(_) => None,
        };
        if let Some(faction) = duplicate {
            outcome.result = Err(CatalogError::DuplicateFaction(faction));
        }
        summary.outcomes.push(outcome);
    }

    if summary.outcomes.is_empty() {
        tracing::warn!("No data files found in {}", path.display());
    }

    Ok(summary)
}

fn validate_file(path: &Path, options: &LoadOptions) -> FileOutcome {
    tracing::debug!("Validating {}", path.display());
    let result = load_document_from_file(path, options).map(|doc| doc.faction);
    if let Err(e) = &result {
        tracing::error!("{}: {e}", path.display());
    }
    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}
