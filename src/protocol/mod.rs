use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::config::CoreConfig;
use crate::model::key_status::KeyGroup;
use crate::services::gen_l10n::{ProcessRunner, ToolRunner};
use crate::services::projection::{PlaceholderEdit, TranslationRow};
use crate::services::session::Session;

mod command;
pub use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn get_str<'a>(payload: &'a Value, field: &str) -> &'a str {
    payload.get(field).and_then(|v| v.as_str()).unwrap_or("")
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn rows_json(rows: &[TranslationRow]) -> Value {
    Value::Array(
        rows.iter()
            .map(|r| {
                json!({
                    "file_path": r.file_path.to_string_lossy(),
                    "file_name": r.file_name,
                    "key": r.key,
                    "locale": r.locale,
                    "text": r.text,
                    "placeholder": r.placeholder,
                    "placeholder_json": r.placeholder_json(),
                })
            })
            .collect(),
    )
}

fn groups_json(groups: &[KeyGroup]) -> Value {
    Value::Array(
        groups
            .iter()
            .map(|g| {
                let keys: Vec<Value> = g
                    .keys
                    .iter()
                    .map(|k| {
                        json!({
                            "key": k.key,
                            "present_in_count": k.present_in_count,
                            "total_documents": k.total_documents,
                            "is_complete": k.is_complete,
                            "status_text": k.status_text(),
                        })
                    })
                    .collect();
                json!({ "group_name": g.group_name, "keys": keys })
            })
            .collect(),
    )
}

fn paths_from_payload(payload: &Value) -> Result<Vec<PathBuf>, String> {
    let arr = payload
        .get("paths")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "payload.paths must be an array".to_string())?;

    let mut paths = Vec::with_capacity(arr.len());
    for (i, v) in arr.iter().enumerate() {
        match v.as_str() {
            Some(s) if !s.trim().is_empty() => paths.push(PathBuf::from(s)),
            _ => return Err(format!("invalid path at index {i}")),
        }
    }
    Ok(paths)
}

/// Sidecar state: the editing session plus what it needs to run tools.
pub struct Core {
    pub session: Session,
    pub config: CoreConfig,
    runner: Box<dyn ToolRunner>,
}

impl Core {
    pub fn new(config: CoreConfig) -> Self {
        Self::with_runner(config, Box::new(ProcessRunner))
    }

    pub fn with_runner(config: CoreConfig, runner: Box<dyn ToolRunner>) -> Self {
        Self {
            session: Session::new(),
            config,
            runner,
        }
    }

    fn settings_json(&self) -> Value {
        let s = &self.session;
        let flutter = s
            .flutter_project_path
            .as_deref()
            .map(|p| p.to_string_lossy().to_string());
        json!({
            "project_name": s.project_name,
            "flutter_project_path": flutter,
            "sort_keys_on_save": s.sort_keys_on_save,
            "new_key_name": s.new_key_name,
            "selected_key": s.selected_key(),
        })
    }

    /// Handles one request line and returns the response line.
    pub fn handle(&mut self, input: &str) -> String {
        let req: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(_) => {
                return json!({
                    "status": "error",
                    "message": "invalid json"
                })
                .to_string();
            }
        };

        let id = get_id(&req);
        let cmd_str = get_cmd(&req);
        let payload = get_payload(&req);

        tracing::debug!("request {cmd_str}");

        match Command::from(cmd_str) {
            Command::Ping => ok(id, json!({ "message": "arb-core alive" })),

            Command::FilesAdd => {
                let paths = match paths_from_payload(payload) {
                    Ok(v) => v,
                    Err(e) => return err(id, e),
                };
                let report = self.session.add_files(&paths);
                ok(id, json!({ "report": report, "files": self.session.summaries() }))
            }

            Command::FilesRemove => {
                let path = get_str(payload, "path");
                if path.is_empty() {
                    return err(id, "payload.path is required");
                }
                let removed = self.session.remove_file(Path::new(path));
                ok(id, json!({ "removed": removed, "files": self.session.summaries() }))
            }

            Command::FilesList => ok(
                id,
                json!({
                    "files": self.session.summaries(),
                    "unique_languages": self.session.unique_languages(),
                }),
            ),

            Command::FilesSetLocale => {
                let path = get_str(payload, "path");
                if path.is_empty() {
                    return err(id, "payload.path is required");
                }
                let locale = get_str(payload, "locale");
                match self.session.set_language_code(Path::new(path), locale) {
                    Ok(()) => ok(id, json!({ "files": self.session.summaries() })),
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::FilesSaveAll => ok(id, json!({ "report": self.session.save_all() })),

            Command::KeysList => ok(id, json!({ "keys": self.session.global_keys() })),

            Command::KeysGroups => ok(id, json!({ "groups": groups_json(&self.session.groups()) })),

            Command::KeysAdd => {
                if let Some(key) = payload.get("key").and_then(|v| v.as_str()) {
                    self.session.new_key_name = key.to_string();
                }
                match self.session.add_new_key() {
                    Ok(key) => ok(
                        id,
                        json!({ "key": key, "rows": rows_json(self.session.current_rows()) }),
                    ),
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::KeysRemove => {
                let key = get_str(payload, "key");
                let removed = if key.is_empty() {
                    self.session.remove_selected_key()
                } else {
                    self.session.remove_key(key);
                    Some(key.to_string())
                };
                ok(id, json!({ "removed": removed }))
            }

            Command::KeysSync => {
                let filled = self.session.sync_missing_keys();
                ok(id, json!({ "filled": filled, "keys": self.session.global_keys() }))
            }

            Command::KeysSelect => {
                let key = get_str(payload, "key");
                let rows = rows_json(self.session.select_key(key));
                ok(id, json!({ "key": key, "rows": rows }))
            }

            Command::TranslationWrite => {
                let path = get_str(payload, "path");
                if path.is_empty() {
                    return err(id, "payload.path is required");
                }
                let text = get_str(payload, "text");
                match self.session.write_translation(Path::new(path), text) {
                    Ok(()) => ok(id, json!({ "rows": rows_json(self.session.current_rows()) })),
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::PlaceholderWrite => {
                let path = get_str(payload, "path");
                if path.is_empty() {
                    return err(id, "payload.path is required");
                }
                let input = get_str(payload, "json");
                match self.session.write_placeholder(Path::new(path), input) {
                    Ok(outcome) => {
                        let (state, reason) = match outcome {
                            PlaceholderEdit::Updated => ("updated", None),
                            PlaceholderEdit::Removed => ("removed", None),
                            PlaceholderEdit::Discarded(r) => ("discarded", Some(r)),
                        };
                        ok(
                            id,
                            json!({
                                "outcome": state,
                                "reason": reason,
                                "rows": rows_json(self.session.current_rows()),
                            }),
                        )
                    }
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::SettingsSet => {
                if let Some(p) = payload.get("flutter_project_path").and_then(|v| v.as_str()) {
                    let p = p.trim();
                    self.session.flutter_project_path =
                        if p.is_empty() { None } else { Some(PathBuf::from(p)) };
                    tracing::info!("Flutter project path set to: {p}");
                }
                if let Some(sort) = payload.get("sort_keys_on_save").and_then(|v| v.as_bool()) {
                    self.session.sort_keys_on_save = sort;
                }
                if let Some(name) = payload.get("project_name").and_then(|v| v.as_str()) {
                    self.session.project_name = name.to_string();
                }
                if let Some(name) = payload.get("new_key_name").and_then(|v| v.as_str()) {
                    self.session.new_key_name = name.to_string();
                }
                ok(id, json!({ "settings": self.settings_json() }))
            }

            Command::ProjectNew => {
                self.session.new_project();
                ok(id, json!({ "settings": self.settings_json() }))
            }

            Command::ProjectOpen => {
                let path = get_str(payload, "path");
                if path.is_empty() {
                    return err(id, "payload.path is required");
                }
                match self.session.open_project(Path::new(path)) {
                    Ok(report) => ok(
                        id,
                        json!({
                            "report": report,
                            "files": self.session.summaries(),
                            "settings": self.settings_json(),
                        }),
                    ),
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::ProjectSave => {
                let path = get_str(payload, "path");
                if path.is_empty() {
                    return err(id, "payload.path is required");
                }
                match self.session.save_project(Path::new(path)) {
                    Ok(bundle) => ok(id, json!({ "project": bundle })),
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::GenL10nRun => {
                let save_first = payload
                    .get("save_first")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                let program = self.config.flutter_program.as_str();
                let runner = &*self.runner;

                let result = if save_first {
                    self.session
                        .save_all_and_generate(runner, program)
                        .map(|(report, output)| (Some(report), output))
                } else {
                    self.session.run_gen_l10n(runner, program).map(|o| (None, o))
                };

                match result {
                    Ok((report, output)) => ok(
                        id,
                        json!({
                            "success": output.success(),
                            "output": output,
                            "save_report": report,
                        }),
                    ),
                    Err(e) => err(id, e.to_string()),
                }
            }

            Command::QaRun => ok(id, json!({ "issues": self.session.qa() })),

            Command::Unknown => err(id, "unknown command"),
        }
    }
}
