use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ArbError, Result};

pub const LOCALE_FIELD: &str = "@@locale";
pub const FILE_METADATA_PREFIX: &str = "@@";
pub const KEY_METADATA_PREFIX: &str = "@";

/// Shown in listings for documents without `@@locale`.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Per-key metadata (`@key`). Kept as an opaque JSON object.
pub type Placeholder = Map<String, Value>;

/// One `.arb` file: a single locale's translations plus its metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArbDocument {
    pub file_path: PathBuf,

    /// Value of `@@locale`, empty when the file has none.
    pub language_code: String,

    /// Insertion order is the order written by an unsorted save.
    pub translations: IndexMap<String, String>,

    /// Only keys also present in `translations`.
    pub placeholders: IndexMap<String, Placeholder>,

    /// `@@name` fields other than `@@locale`, kept verbatim.
    pub file_metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentSummary {
    pub file_path: String,
    pub file_name: String,
    pub language_code: String,
    pub key_count: usize,
}

enum Field {
    Locale,
    FileMetadata,
    KeyMetadata,
    Translation,
}

// `@@` must be tested before `@`: every document-level field also carries
// the per-key prefix.
fn classify(name: &str) -> Field {
    if name == LOCALE_FIELD {
        Field::Locale
    } else if name.starts_with(FILE_METADATA_PREFIX) {
        Field::FileMetadata
    } else if name.len() > KEY_METADATA_PREFIX.len() && name.starts_with(KEY_METADATA_PREFIX) {
        Field::KeyMetadata
    } else {
        Field::Translation
    }
}

/// Keys starting with `@` share the namespace of the metadata fields and
/// would not survive a save.
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(KEY_METADATA_PREFIX)
}

fn coerce_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn ordered<V>(map: &IndexMap<String, V>, sort_keys: bool) -> Vec<(&String, &V)> {
    let mut items: Vec<(&String, &V)> = map.iter().collect();
    if sort_keys {
        items.sort_by(|a, b| a.0.cmp(b.0));
    }
    items
}

impl ArbDocument {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Parses the raw text of an `.arb` file.
    ///
    /// Per-key metadata that is not a JSON object is dropped, as is metadata
    /// whose key has no translation entry once the whole object is read.
    pub fn parse(file_path: impl Into<PathBuf>, raw: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(raw)?;
        let Value::Object(fields) = root else {
            return Err(ArbError::format("document root must be a JSON object"));
        };

        let mut doc = Self::new(file_path);

        for (name, value) in fields {
            match classify(&name) {
                Field::Locale => doc.language_code = coerce_text(value),
                Field::FileMetadata => {
                    doc.file_metadata.insert(name, value);
                }
                Field::KeyMetadata => {
                    if let Value::Object(meta) = value {
                        let key = name[KEY_METADATA_PREFIX.len()..].to_string();
                        doc.placeholders.insert(key, meta);
                    }
                }
                Field::Translation => {
                    doc.translations.insert(name, coerce_text(value));
                }
            }
        }

        let translations = &doc.translations;
        doc.placeholders.retain(|key, _| translations.contains_key(key));

        Ok(doc)
    }

    pub fn to_json_value(&self, sort_keys: bool) -> Value {
        let mut out = Map::new();

        for (name, value) in &self.file_metadata {
            out.insert(name.clone(), value.clone());
        }

        if !self.language_code.is_empty() {
            out.insert(
                LOCALE_FIELD.to_string(),
                Value::String(self.language_code.clone()),
            );
        }

        for (key, text) in ordered(&self.translations, sort_keys) {
            out.insert(key.clone(), Value::String(text.clone()));
        }

        for (key, meta) in ordered(&self.placeholders, sort_keys) {
            out.insert(
                format!("{KEY_METADATA_PREFIX}{key}"),
                Value::Object(meta.clone()),
            );
        }

        Value::Object(out)
    }

    /// Pretty-printed JSON text of the document.
    pub fn serialize(&self, sort_keys: bool) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value(sort_keys))?)
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_path.to_string_lossy().to_string())
    }

    pub fn set_language_code(&mut self, code: impl Into<String>) {
        self.language_code = code.into();
    }

    pub fn summary(&self) -> DocumentSummary {
        let language_code = if self.language_code.is_empty() {
            UNKNOWN_LANGUAGE.to_string()
        } else {
            self.language_code.clone()
        };

        DocumentSummary {
            file_path: self.file_path.to_string_lossy().to_string(),
            file_name: self.file_name(),
            language_code,
            key_count: self.translations.len(),
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.translations.contains_key(key)
    }

    pub fn translation(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(String::as_str)
    }

    pub fn placeholder(&self, key: &str) -> Option<&Placeholder> {
        self.placeholders.get(key)
    }

    /// Appends `key` with `default`; existing keys are left untouched.
    pub fn add_key(&mut self, key: &str, default: &str) {
        self.ensure_key(key, default);
    }

    /// Same contract as [`add_key`](Self::add_key); reports whether a key was inserted.
    pub fn ensure_key(&mut self, key: &str, default: &str) -> bool {
        if self.translations.contains_key(key) {
            return false;
        }
        self.translations.insert(key.to_string(), default.to_string());
        true
    }

    /// Removes the translation and its metadata. Absent keys are ignored.
    pub fn remove_key(&mut self, key: &str) {
        self.translations.shift_remove(key);
        self.placeholders.shift_remove(key);
    }

    /// Inserts or replaces the text; new keys go to the end.
    pub fn set_translation(&mut self, key: &str, text: impl Into<String>) {
        self.translations.insert(key.to_string(), text.into());
    }

    /// Stores metadata for `key`, creating an empty translation if needed.
    pub fn set_placeholder(&mut self, key: &str, meta: Placeholder) {
        self.ensure_key(key, "");
        self.placeholders.insert(key.to_string(), meta);
    }

    pub fn remove_placeholder(&mut self, key: &str) -> Option<Placeholder> {
        self.placeholders.shift_remove(key)
    }
}
