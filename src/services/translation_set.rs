use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{ArbError, Result};
use crate::model::document::{is_reserved_key, ArbDocument};

/// All loaded documents. File paths are unique within a set.
#[derive(Debug, Clone, Default)]
pub struct TranslationSet {
    documents: Vec<ArbDocument>,
}

impl TranslationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: impl IntoIterator<Item = ArbDocument>) -> Result<Self> {
        let mut set = Self::new();
        for doc in documents {
            set.add_document(doc)?;
        }
        Ok(set)
    }

    pub fn documents(&self) -> &[ArbDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains_document(&self, path: &Path) -> bool {
        self.documents.iter().any(|d| d.file_path == path)
    }

    pub fn get(&self, path: &Path) -> Option<&ArbDocument> {
        self.documents.iter().find(|d| d.file_path == path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut ArbDocument> {
        self.documents.iter_mut().find(|d| d.file_path == path)
    }

    pub fn add_document(&mut self, doc: ArbDocument) -> Result<()> {
        if self.contains_document(&doc.file_path) {
            return Err(ArbError::DuplicateDocument(doc.file_path));
        }
        self.documents.push(doc);
        Ok(())
    }

    /// Returns the removed document, `None` when it was not in the set.
    pub fn remove_document(&mut self, path: &Path) -> Option<ArbDocument> {
        let idx = self.documents.iter().position(|d| d.file_path == path)?;
        Some(self.documents.remove(idx))
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn has_key_anywhere(&self, key: &str) -> bool {
        self.documents.iter().any(|d| d.has_key(key))
    }

    /// Adds a brand-new key with an empty value to every document.
    ///
    /// The key is trimmed first. Blank keys, keys starting with `@` and keys
    /// already present in any document are rejected. Returns the key as stored.
    pub fn add_key_everywhere(&mut self, key: &str) -> Result<String> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ArbError::validation("translation key must not be empty"));
        }
        if is_reserved_key(key) {
            return Err(ArbError::validation(format!(
                "translation key '{key}' must not start with '@'"
            )));
        }
        if self.has_key_anywhere(key) {
            return Err(ArbError::validation(format!(
                "translation key '{key}' already exists"
            )));
        }

        for doc in &mut self.documents {
            doc.add_key(key, "");
        }

        Ok(key.to_string())
    }

    /// Removes `key` and its metadata from every document. Empty keys are ignored.
    pub fn remove_key_everywhere(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        for doc in &mut self.documents {
            doc.remove_key(key);
        }
    }

    /// Fills every (key, document) gap with an empty value and returns how
    /// many entries were inserted. The key union is taken before inserting.
    pub fn sync_missing_keys(&mut self) -> usize {
        let keys = self.global_keys();
        let mut filled = 0usize;

        for doc in &mut self.documents {
            for key in &keys {
                if doc.ensure_key(key, "") {
                    filled += 1;
                }
            }
        }

        filled
    }

    /// Sorted, deduplicated union of every document's translation keys.
    pub fn global_keys(&self) -> Vec<String> {
        let keys: BTreeSet<&str> = self
            .documents
            .iter()
            .flat_map(|d| d.translations.keys().map(String::as_str))
            .collect();

        keys.into_iter().map(str::to_string).collect()
    }
}
