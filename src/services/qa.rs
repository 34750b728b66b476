use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::translation_set::TranslationSet;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QaIssue {
    pub file_path: String,
    pub key: Option<String>,
    pub code: String,
    pub message: String,
}

fn issue(file_path: String, key: Option<&str>, code: &str, message: String) -> QaIssue {
    QaIssue {
        file_path,
        key: key.map(str::to_string),
        code: code.to_string(),
        message,
    }
}

/// Review report over the whole set, one document at a time.
pub fn run(set: &TranslationSet) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();
    let global = set.global_keys();

    let mut by_locale: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for doc in set.documents() {
        let path = doc.file_path.to_string_lossy().to_string();

        if doc.language_code.trim().is_empty() {
            issues.push(issue(
                path.clone(),
                None,
                "MISSING_LOCALE",
                "Document has no @@locale".to_string(),
            ));
        } else {
            by_locale
                .entry(doc.language_code.as_str())
                .or_default()
                .push(path.clone());
        }

        for key in &global {
            match doc.translation(key) {
                None => issues.push(issue(
                    path.clone(),
                    Some(key),
                    "MISSING_KEY",
                    format!("Key '{key}' is missing from this document"),
                )),
                Some(text) if text.trim().is_empty() => issues.push(issue(
                    path.clone(),
                    Some(key),
                    "EMPTY_TRANSLATION",
                    format!("Key '{key}' has no translation"),
                )),
                Some(_) => {}
            }
        }
    }

    for (locale, paths) in by_locale {
        if paths.len() < 2 {
            continue;
        }
        // reported once per extra document
        for path in paths.into_iter().skip(1) {
            issues.push(issue(
                path,
                None,
                "DUPLICATE_LOCALE",
                format!("Locale '{locale}' is used by more than one document"),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::ArbDocument;

    fn codes(issues: &[QaIssue]) -> Vec<(&str, Option<&str>, &str)> {
        issues
            .iter()
            .map(|i| (i.file_path.as_str(), i.key.as_deref(), i.code.as_str()))
            .collect()
    }

    #[test]
    fn reports_gaps_blanks_and_locale_problems() {
        let en = ArbDocument::parse("en.arb", r#"{"@@locale":"en","a":"A","b":" "}"#).unwrap();
        let en2 = ArbDocument::parse("en_GB.arb", r#"{"@@locale":"en","a":"A","b":"B"}"#).unwrap();
        let none = ArbDocument::parse("x.arb", r#"{"a":"A"}"#).unwrap();
        let set = TranslationSet::from_documents([en, en2, none]).unwrap();

        let issues = run(&set);
        assert_eq!(
            codes(&issues),
            vec![
                ("en.arb", Some("b"), "EMPTY_TRANSLATION"),
                ("x.arb", None, "MISSING_LOCALE"),
                ("x.arb", Some("b"), "MISSING_KEY"),
                ("en_GB.arb", None, "DUPLICATE_LOCALE"),
            ]
        );
    }

    #[test]
    fn complete_set_is_clean() {
        let en = ArbDocument::parse("en.arb", r#"{"@@locale":"en","a":"A"}"#).unwrap();
        let de = ArbDocument::parse("de.arb", r#"{"@@locale":"de","a":"Ä"}"#).unwrap();
        let set = TranslationSet::from_documents([en, de]).unwrap();

        assert!(run(&set).is_empty());
    }
}
