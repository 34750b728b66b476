use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::model::document::{is_reserved_key, Placeholder};
use crate::services::translation_set::TranslationSet;

/// One document's view of the selected key.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslationRow {
    pub file_path: PathBuf,
    pub file_name: String,
    pub key: String,
    pub locale: String,
    pub text: String,
    pub placeholder: Option<Placeholder>,
}

impl TranslationRow {
    /// Pretty JSON of the metadata, empty when there is none.
    pub fn placeholder_json(&self) -> String {
        self.placeholder
            .as_ref()
            .and_then(|p| serde_json::to_string_pretty(p).ok())
            .unwrap_or_default()
    }
}

/// Outcome of a metadata edit. Edits never fail; a discarded edit leaves
/// both the row and the document as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderEdit {
    Updated,
    Removed,
    Discarded(String),
}

/// One row per document, in set order. Missing keys project as empty text.
pub fn project_key(set: &TranslationSet, key: &str) -> Vec<TranslationRow> {
    set.documents()
        .iter()
        .map(|doc| TranslationRow {
            file_path: doc.file_path.clone(),
            file_name: doc.file_name(),
            key: key.to_string(),
            locale: doc.language_code.clone(),
            text: doc.translation(key).unwrap_or_default().to_string(),
            placeholder: doc.placeholder(key).cloned(),
        })
        .collect()
}

/// Returns `false` when the row's document is no longer in the set or the
/// key is reserved for metadata.
pub fn write_translation(set: &mut TranslationSet, row: &mut TranslationRow, text: &str) -> bool {
    if is_reserved_key(&row.key) {
        return false;
    }
    let Some(doc) = set.get_mut(&row.file_path) else {
        return false;
    };
    doc.set_translation(&row.key, text);
    row.text = text.to_string();
    true
}

/// Blank input removes the metadata; anything else must be a JSON object.
pub fn write_placeholder(
    set: &mut TranslationSet,
    row: &mut TranslationRow,
    input: &str,
) -> PlaceholderEdit {
    if is_reserved_key(&row.key) {
        return PlaceholderEdit::Discarded("key is reserved for metadata".to_string());
    }
    let Some(doc) = set.get_mut(&row.file_path) else {
        return PlaceholderEdit::Discarded("document is no longer loaded".to_string());
    };

    if input.trim().is_empty() {
        doc.remove_placeholder(&row.key);
        row.placeholder = None;
        return PlaceholderEdit::Removed;
    }

    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(meta)) => {
            doc.set_placeholder(&row.key, meta.clone());
            row.placeholder = Some(meta);
            PlaceholderEdit::Updated
        }
        Ok(_) => PlaceholderEdit::Discarded("metadata must be a JSON object".to_string()),
        Err(e) => PlaceholderEdit::Discarded(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::ArbDocument;
    use serde_json::json;
    use std::path::Path;

    fn set() -> TranslationSet {
        let en = ArbDocument::parse(
            "en.arb",
            r#"{"@@locale":"en","greeting":"Hi","@greeting":{"description":"hello"}}"#,
        )
        .unwrap();
        let de = ArbDocument::parse("de.arb", r#"{"@@locale":"de"}"#).unwrap();
        TranslationSet::from_documents([en, de]).unwrap()
    }

    #[test]
    fn projects_one_row_per_document() {
        let rows = project_key(&set(), "greeting");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].locale, "en");
        assert_eq!(rows[0].text, "Hi");
        assert_eq!(rows[0].placeholder, json!({"description": "hello"}).as_object().cloned());
        assert_eq!(rows[1].locale, "de");
        assert_eq!(rows[1].text, "");
        assert!(rows[1].placeholder.is_none());
        assert_eq!(rows[1].placeholder_json(), "");
    }

    #[test]
    fn translation_write_is_visible_to_the_set() {
        let mut set = set();
        let mut rows = project_key(&set, "greeting");

        assert!(write_translation(&mut set, &mut rows[1], "Hallo"));
        assert_eq!(rows[1].text, "Hallo");
        assert_eq!(set.get(Path::new("de.arb")).unwrap().translation("greeting"), Some("Hallo"));
        assert_eq!(set.global_keys(), vec!["greeting"]);
    }

    #[test]
    fn invalid_placeholder_edit_is_discarded() {
        let mut set = set();
        let mut rows = project_key(&set, "greeting");
        let before = set.get(Path::new("en.arb")).unwrap().placeholder("greeting").cloned();

        let outcome = write_placeholder(&mut set, &mut rows[0], "not json");
        assert!(matches!(outcome, PlaceholderEdit::Discarded(_)));

        let outcome = write_placeholder(&mut set, &mut rows[0], "[1, 2]");
        assert!(matches!(outcome, PlaceholderEdit::Discarded(_)));

        assert_eq!(set.get(Path::new("en.arb")).unwrap().placeholder("greeting").cloned(), before);
        assert_eq!(rows[0].placeholder, before);
    }

    #[test]
    fn blank_placeholder_edit_removes_metadata() {
        let mut set = set();
        let mut rows = project_key(&set, "greeting");

        assert_eq!(write_placeholder(&mut set, &mut rows[0], "  \n"), PlaceholderEdit::Removed);
        assert!(set.get(Path::new("en.arb")).unwrap().placeholder("greeting").is_none());
        assert!(rows[0].placeholder.is_none());
    }

    #[test]
    fn valid_placeholder_edit_updates_metadata() {
        let mut set = set();
        let mut rows = project_key(&set, "greeting");

        let input = r#"{"placeholders":{"name":{"type":"String"}}}"#;
        assert_eq!(write_placeholder(&mut set, &mut rows[1], input), PlaceholderEdit::Updated);

        let de = set.get(Path::new("de.arb")).unwrap();
        assert_eq!(de.translation("greeting"), Some(""));
        assert_eq!(
            de.placeholder("greeting"),
            json!({"placeholders": {"name": {"type": "String"}}}).as_object()
        );
    }

    #[test]
    fn writes_under_reserved_keys_are_refused() {
        let mut set = set();
        let mut rows = project_key(&set, "@@locale");

        assert!(!write_translation(&mut set, &mut rows[0], ""));
        assert!(matches!(
            write_placeholder(&mut set, &mut rows[0], "{}"),
            PlaceholderEdit::Discarded(_)
        ));

        let en = set.get(Path::new("en.arb")).unwrap();
        assert_eq!(en.language_code, "en");
        assert!(!en.has_key("@@locale"));
    }

    #[test]
    fn writes_to_removed_documents_are_ignored() {
        let mut set = set();
        let mut rows = project_key(&set, "greeting");
        set.remove_document(Path::new("de.arb"));

        assert!(!write_translation(&mut set, &mut rows[1], "Hallo"));
        assert!(matches!(
            write_placeholder(&mut set, &mut rows[1], "{}"),
            PlaceholderEdit::Discarded(_)
        ));
        assert_eq!(rows[1].text, "");
    }
}
