use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{ArbError, Result};
use crate::model::document::{is_reserved_key, ArbDocument, DocumentSummary};
use crate::model::key_status::KeyGroup;
use crate::model::project::{ProjectBundle, DEFAULT_PROJECT_NAME};
use crate::services::gen_l10n::{self, ToolOutput, ToolRunner};
use crate::services::projection::{self, PlaceholderEdit, TranslationRow};
use crate::services::translation_set::TranslationSet;
use crate::services::{arb_file, grouping, project, qa};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FileFailure>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: Vec<String>,
    pub failed: Vec<FileFailure>,
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Editor state around a [`TranslationSet`]: current key, pending new key
/// and project settings. Rows for the current key are re-projected after
/// every change that can affect them.
#[derive(Debug)]
pub struct Session {
    set: TranslationSet,
    selected_key: Option<String>,
    rows: Vec<TranslationRow>,

    pub new_key_name: String,
    pub project_name: String,
    pub flutter_project_path: Option<PathBuf>,
    pub sort_keys_on_save: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            set: TranslationSet::new(),
            selected_key: None,
            rows: Vec::new(),
            new_key_name: String::new(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            flutter_project_path: None,
            sort_keys_on_save: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) -> &TranslationSet {
        &self.set
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    pub fn current_rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.set.documents().iter().map(ArbDocument::summary).collect()
    }

    pub fn global_keys(&self) -> Vec<String> {
        self.set.global_keys()
    }

    pub fn groups(&self) -> Vec<KeyGroup> {
        grouping::group(self.set.documents())
    }

    pub fn qa(&self) -> Vec<qa::QaIssue> {
        qa::run(&self.set)
    }

    /// Distinct locales, sorted and comma separated.
    pub fn unique_languages(&self) -> String {
        let mut langs: Vec<&str> = self
            .set
            .documents()
            .iter()
            .map(|d| d.language_code.as_str())
            .filter(|l| !l.is_empty())
            .collect();
        langs.sort_unstable();
        langs.dedup();
        langs.join(", ")
    }

    fn refresh_rows(&mut self) {
        self.rows = match &self.selected_key {
            Some(key) => projection::project_key(&self.set, key),
            None => Vec::new(),
        };
    }

    fn is_loaded(&self, path: &Path) -> bool {
        let wanted = display(path).to_lowercase();
        self.set
            .documents()
            .iter()
            .any(|d| display(&d.file_path).to_lowercase() == wanted)
    }

    /// Loads each file independently. Already loaded paths (compared
    /// case-insensitively) are skipped; a bad file does not stop the batch.
    pub fn add_files<I, P>(&mut self, paths: I) -> LoadReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = LoadReport::default();

        for path in paths {
            let path = path.as_ref();

            if self.is_loaded(path) {
                report.skipped.push(display(path));
                continue;
            }

            match arb_file::load(path).and_then(|doc| self.set.add_document(doc)) {
                Ok(()) => {
                    info!("Loaded ARB file: {}", path.display());
                    report.loaded.push(display(path));
                }
                Err(e) => {
                    error!("Failed to load ARB file: {}: {e}", path.display());
                    report.failed.push(FileFailure {
                        path: display(path),
                        message: e.to_string(),
                    });
                }
            }
        }

        self.refresh_rows();
        report
    }

    pub fn remove_file(&mut self, path: &Path) -> bool {
        let removed = self.set.remove_document(path).is_some();
        if removed {
            info!("Removed ARB file: {}", path.display());
            self.refresh_rows();
        }
        removed
    }

    pub fn set_language_code(&mut self, path: &Path, code: &str) -> Result<()> {
        let doc = self.set.get_mut(path).ok_or_else(|| {
            ArbError::validation(format!("document not loaded: {}", path.display()))
        })?;
        doc.set_language_code(code.trim());
        self.refresh_rows();
        Ok(())
    }

    pub fn can_add_new_key(&self) -> bool {
        !self.new_key_name.trim().is_empty() && !self.set.is_empty()
    }

    /// Adds `new_key_name` to every document, selects it and clears the input.
    pub fn add_new_key(&mut self) -> Result<String> {
        let key = match self.set.add_key_everywhere(&self.new_key_name) {
            Ok(key) => key,
            Err(e) => {
                warn!("Cannot add translation key '{}': {e}", self.new_key_name.trim());
                return Err(e);
            }
        };

        self.new_key_name.clear();
        self.select_key(&key);
        info!("Added new translation key: {key}");
        Ok(key)
    }

    pub fn add_key(&mut self, key: &str) -> Result<String> {
        self.new_key_name = key.to_string();
        self.add_new_key()
    }

    pub fn can_remove_key(&self) -> bool {
        self.selected_key.is_some()
    }

    /// Removes `key` from every document and clears the selection.
    pub fn remove_key(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        self.set.remove_key_everywhere(key);
        self.selected_key = None;
        self.refresh_rows();
        info!("Removed translation key: {key}");
    }

    pub fn remove_selected_key(&mut self) -> Option<String> {
        let key = self.selected_key.clone()?;
        self.remove_key(&key);
        Some(key)
    }

    /// Selects `key` (empty clears the selection) and returns its rows.
    pub fn select_key(&mut self, key: &str) -> &[TranslationRow] {
        self.selected_key = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };
        self.refresh_rows();
        &self.rows
    }

    fn row_index(&self, path: &Path) -> Result<usize> {
        let Some(key) = self.selected_key.as_deref() else {
            return Err(ArbError::validation("no translation key selected"));
        };
        if is_reserved_key(key) {
            return Err(ArbError::validation(format!(
                "'{key}' is reserved for metadata and cannot be edited"
            )));
        }
        self.rows
            .iter()
            .position(|r| r.file_path == path)
            .ok_or_else(|| ArbError::validation(format!("document not loaded: {}", path.display())))
    }

    pub fn write_translation(&mut self, path: &Path, text: &str) -> Result<()> {
        let idx = self.row_index(path)?;
        projection::write_translation(&mut self.set, &mut self.rows[idx], text);
        Ok(())
    }

    pub fn write_placeholder(&mut self, path: &Path, input: &str) -> Result<PlaceholderEdit> {
        let idx = self.row_index(path)?;
        let outcome = projection::write_placeholder(&mut self.set, &mut self.rows[idx], input);
        if let PlaceholderEdit::Discarded(reason) = &outcome {
            warn!("Ignored placeholder edit for {}: {reason}", path.display());
        }
        Ok(outcome)
    }

    pub fn sync_missing_keys(&mut self) -> usize {
        let filled = self.set.sync_missing_keys();
        info!("Filled {filled} missing translation entries");
        self.refresh_rows();
        filled
    }

    /// Saves every document; failures leave the in-memory state untouched.
    pub fn save_all(&self) -> SaveReport {
        let mut report = SaveReport::default();

        for doc in self.set.documents() {
            match arb_file::save(doc, self.sort_keys_on_save) {
                Ok(()) => {
                    info!("Saved ARB file: {}", doc.file_path.display());
                    report.saved.push(display(&doc.file_path));
                }
                Err(e) => {
                    error!("Failed to save ARB file: {}: {e}", doc.file_path.display());
                    report.failed.push(FileFailure {
                        path: display(&doc.file_path),
                        message: e.to_string(),
                    });
                }
            }
        }

        report
    }

    pub fn run_gen_l10n(&self, runner: &dyn ToolRunner, program: &str) -> Result<ToolOutput> {
        let Some(dir) = self.flutter_project_path.as_deref() else {
            warn!("Flutter project path not set");
            return Err(ArbError::validation("flutter project path not set"));
        };
        gen_l10n::run(runner, program, dir)
    }

    /// Generation only runs once every document has been written.
    pub fn save_all_and_generate(
        &self,
        runner: &dyn ToolRunner,
        program: &str,
    ) -> Result<(SaveReport, ToolOutput)> {
        let report = self.save_all();
        if !report.failed.is_empty() {
            warn!("Skipping gen-l10n: {} ARB file(s) failed to save", report.failed.len());
            return Err(ArbError::validation(format!(
                "{} ARB file(s) failed to save; code generation skipped",
                report.failed.len()
            )));
        }
        let output = self.run_gen_l10n(runner, program)?;
        Ok((report, output))
    }

    /// Drops every document and resets the project name.
    pub fn new_project(&mut self) {
        self.set.clear();
        self.selected_key = None;
        self.rows.clear();
        self.new_key_name.clear();
        self.project_name = DEFAULT_PROJECT_NAME.to_string();
    }

    /// Replaces the loaded documents with the ones listed in the bundle.
    /// Listed files that no longer exist are reported as skipped.
    pub fn open_project(&mut self, path: &Path) -> Result<LoadReport> {
        let bundle = project::open_project(path)?;

        self.new_project();
        self.project_name = bundle.project_name.clone();
        self.sort_keys_on_save = bundle.sort_keys_on_save;
        self.flutter_project_path = Some(bundle.flutter_project_path.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let (present, missing): (Vec<&String>, Vec<&String>) = bundle
            .arb_file_paths
            .iter()
            .partition(|p| Path::new(p.as_str()).is_file());

        let mut report = self.add_files(present.iter().map(|p| Path::new(p.as_str())));
        for p in missing {
            warn!("Project file lists a missing ARB file: {p}");
            report.skipped.push(p.clone());
        }

        info!("Loaded project from: {}", path.display());
        Ok(report)
    }

    /// Writes the current state as a bundle. A default or empty project name
    /// is replaced by the bundle's file stem.
    pub fn save_project(&mut self, path: &Path) -> Result<ProjectBundle> {
        if self.project_name.trim().is_empty() || self.project_name == DEFAULT_PROJECT_NAME {
            if let Some(stem) = path.file_stem() {
                self.project_name = stem.to_string_lossy().to_string();
            }
        }

        let flutter = self
            .flutter_project_path
            .as_deref()
            .map(display)
            .unwrap_or_default();

        let bundle = project::bundle_from_state(
            &self.project_name,
            &flutter,
            self.sort_keys_on_save,
            self.set.documents().iter().map(|d| display(&d.file_path)),
        );

        let saved = project::save_project(path, bundle)?;
        info!("Saved project to: {}", path.display());
        Ok(saved)
    }
}
