use serde::Serialize;

/// Group used for keys without a `_` separator.
pub const FALLBACK_GROUP: &str = "General";

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct KeyStatus {
    pub key: String,
    pub present_in_count: usize,
    pub total_documents: usize,
    pub is_complete: bool,
}

impl KeyStatus {
    pub fn new(key: impl Into<String>, present_in_count: usize, total_documents: usize) -> Self {
        Self {
            key: key.into(),
            present_in_count,
            total_documents,
            is_complete: present_in_count == total_documents,
        }
    }

    /// `"Complete"` or `"<present>/<total> files"`.
    pub fn status_text(&self) -> String {
        if self.is_complete {
            "Complete".to_string()
        } else {
            format!("{}/{} files", self.present_in_count, self.total_documents)
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct KeyGroup {
    pub group_name: String,
    pub keys: Vec<KeyStatus>,
}

/// Text before the first `_`, or [`FALLBACK_GROUP`].
pub fn group_name_of(key: &str) -> &str {
    match key.find('_') {
        Some(pos) => &key[..pos],
        None => FALLBACK_GROUP,
    }
}
