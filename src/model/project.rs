use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const PROJECT_FORMAT_VERSION: &str = "1.0";
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

fn default_version() -> String {
    PROJECT_FORMAT_VERSION.to_string()
}

fn now() -> DateTime<Local> {
    Local::now()
}

/// Contents of an `.aep` project bundle.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBundle {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub project_name: String,

    /// Working directory for `gen-l10n`.
    #[serde(default)]
    pub flutter_project_path: String,

    #[serde(default)]
    pub sort_keys_on_save: bool,

    #[serde(default)]
    pub arb_file_paths: Vec<String>,

    #[serde(default = "now")]
    pub last_modified: DateTime<Local>,
}

impl Default for ProjectBundle {
    fn default() -> Self {
        Self {
            version: default_version(),
            project_name: String::new(),
            flutter_project_path: String::new(),
            sort_keys_on_save: false,
            arb_file_paths: Vec::new(),
            last_modified: now(),
        }
    }
}
