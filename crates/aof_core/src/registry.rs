//! Registry of every faction document found in a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::data::FactionDocument;
use crate::error::{CatalogError, Result};
use crate::loader::{load_document_from_file, DocumentFormat, LoadOptions};

/// Loaded faction documents, keyed by faction name.
#[derive(Debug, Clone, Default)]
pub struct FactionRegistry {
    factions: BTreeMap<String, FactionDocument>,
}

impl FactionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factions: BTreeMap::new(),
        }
    }

    /// Register a document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateFaction`] if a document with the
    /// same faction name is already registered.
    pub fn register(&mut self, document: FactionDocument) -> Result<()> {
        if self.factions.contains_key(&document.faction) {
            return Err(CatalogError::DuplicateFaction(document.faction));
        }
        self.factions.insert(document.faction.clone(), document);
        Ok(())
    }

    /// Get a document by faction name.
    #[must_use]
    pub fn get(&self, faction: &str) -> Option<&FactionDocument> {
        self.factions.get(faction)
    }

    /// Check if a faction is registered.
    #[must_use]
    pub fn contains(&self, faction: &str) -> bool {
        self.factions.contains_key(faction)
    }

    /// Registered faction names, sorted.
    pub fn faction_names(&self) -> impl Iterator<Item = &str> {
        self.factions.keys().map(String::as_str)
    }

    /// All registered documents.
    pub fn all_factions(&self) -> impl Iterator<Item = &FactionDocument> {
        self.factions.values()
    }

    /// Get the number of registered factions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factions.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }
}

/// Data files (`.json`, `.ron`) directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the directory cannot be read.
pub fn data_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |e| CatalogError::Io {
        path: dir.display().to_string(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && DocumentFormat::from_path(&path).is_some() {
            files.push(path);
        } else {
            tracing::debug!("Skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Load every faction document in a directory.
///
/// A missing directory yields an empty registry.
///
/// # Errors
///
/// Returns the first load error, or [`CatalogError::DuplicateFaction`].
pub fn load_factions_from_directory(dir: &Path, options: &LoadOptions) -> Result<FactionRegistry> {
    let mut registry = FactionRegistry::new();

    if !dir.exists() {
        tracing::warn!("Faction data directory does not exist: {}", dir.display());
        return Ok(registry);
    }

    for path in data_files_in(dir)? {
        let document = load_document_from_file(&path, options)?;
        registry.register(document)?;
    }

    tracing::info!("Loaded {} factions from {}", registry.len(), dir.display());

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = FactionRegistry::new();
        registry
            .register(FactionDocument::new("Disciples de la Guerre", "Age of Fantasy"))
            .unwrap();

        assert!(registry.contains("Disciples de la Guerre"));
        assert!(!registry.contains("Elfes"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_faction() {
        let mut registry = FactionRegistry::new();
        registry
            .register(FactionDocument::new("Nains", "Age of Fantasy"))
            .unwrap();
        let result = registry.register(FactionDocument::new("Nains", "Age of Fantasy"));

        assert!(matches!(result, Err(CatalogError::DuplicateFaction(_))));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let registry =
            load_factions_from_directory(Path::new("no/such/dir"), &LoadOptions::default())
                .unwrap();
        assert!(registry.is_empty());
    }
}
