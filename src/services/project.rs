use std::path::Path;

use chrono::Local;

use crate::error::{ArbError, Result};
use crate::model::project::{ProjectBundle, PROJECT_FORMAT_VERSION};
use crate::services::{encoding, storage};

pub fn open_project(path: &Path) -> Result<ProjectBundle> {
    if !path.is_file() {
        return Err(ArbError::validation(format!(
            "project file not found: {}",
            path.display()
        )));
    }

    let data = encoding::read_text(path)?;
    let bundle = serde_json::from_str::<ProjectBundle>(&data)
        .map_err(|e| ArbError::format(format!("invalid project file: {e}")))?;

    Ok(bundle)
}

/// Writes the bundle and returns it with `last_modified` refreshed.
pub fn save_project(path: &Path, mut bundle: ProjectBundle) -> Result<ProjectBundle> {
    bundle.last_modified = Local::now();

    if bundle.version.trim().is_empty() {
        bundle.version = PROJECT_FORMAT_VERSION.to_string();
    }

    let json = serde_json::to_string_pretty(&bundle)?;
    storage::write_text(path, &json)?;

    Ok(bundle)
}

pub fn bundle_from_state<I, S>(
    project_name: &str,
    flutter_project_path: &str,
    sort_keys_on_save: bool,
    arb_file_paths: I,
) -> ProjectBundle
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ProjectBundle {
        project_name: project_name.to_string(),
        flutter_project_path: flutter_project_path.to_string(),
        sort_keys_on_save,
        arb_file_paths: arb_file_paths.into_iter().map(Into::into).collect(),
        ..ProjectBundle::default()
    }
}
