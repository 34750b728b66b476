use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes UTF-8 text next to `path` and renames it into place.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&tmp, text.as_bytes())?;

    if fs::rename(&tmp, path).is_err() {
        // rename does not replace an existing file on every platform
        if path.exists() {
            fs::remove_file(path)?;
        }
        fs::rename(&tmp, path)?;
    }

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "arb".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
