use std::path::Path;

use crate::error::Result;
use crate::model::document::ArbDocument;
use crate::services::{encoding, storage};

/// Reads and parses one `.arb` file.
pub fn load(path: &Path) -> Result<ArbDocument> {
    let raw = encoding::read_text(path)?;
    ArbDocument::parse(path, &raw)
}

/// Overwrites the document's `file_path` with its serialized text.
pub fn save(doc: &ArbDocument, sort_keys: bool) -> Result<()> {
    let text = doc.serialize(sort_keys)?;
    storage::write_text(&doc.file_path, &text)
}
