use std::fs;
use std::path::Path;

use arb_core::config::CoreConfig;
use arb_core::protocol::Core;
use serde_json::{json, Value};

fn call(core: &mut Core, cmd: &str, payload: Value) -> Value {
    let line = json!({ "id": 7, "cmd": cmd, "payload": payload }).to_string();
    serde_json::from_str(&core.handle(&line)).unwrap()
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn rejects_invalid_and_unknown_requests() {
    let mut core = Core::new(CoreConfig::default());

    let resp: Value = serde_json::from_str(&core.handle("{oops")).unwrap();
    assert_eq!(resp["status"], "error");
    assert_eq!(resp["message"], "invalid json");

    let resp = call(&mut core, "does.not.exist", Value::Null);
    assert_eq!(resp["status"], "error");
    assert_eq!(resp["id"], 7);

    let resp = call(&mut core, "ping", Value::Null);
    assert_eq!(resp["status"], "ok");
}

#[test]
fn key_workflow_over_the_wire() {
    let dir = tempfile::tempdir().unwrap();
    let en = write(dir.path(), "en.arb", r#"{"@@locale":"en","greeting":"Hi","farewell":"Bye"}"#);
    let de = write(dir.path(), "de.arb", r#"{"@@locale":"de","greeting":"Hallo"}"#);

    let mut core = Core::new(CoreConfig::default());

    let resp = call(&mut core, "files.add", json!({ "paths": [en, de] }));
    assert_eq!(resp["payload"]["report"]["loaded"].as_array().unwrap().len(), 2);

    let resp = call(&mut core, "keys.list", Value::Null);
    assert_eq!(resp["payload"]["keys"], json!(["farewell", "greeting"]));

    let resp = call(&mut core, "keys.groups", Value::Null);
    let keys = &resp["payload"]["groups"][0]["keys"];
    assert_eq!(resp["payload"]["groups"][0]["group_name"], "General");
    assert_eq!(keys[0]["key"], "farewell");
    assert_eq!(keys[0]["is_complete"], false);
    assert_eq!(keys[0]["status_text"], "1/2 files");
    assert_eq!(keys[1]["is_complete"], true);

    let resp = call(&mut core, "keys.add", json!({ "key": "home_title" }));
    assert_eq!(resp["status"], "ok");
    assert_eq!(resp["payload"]["rows"].as_array().unwrap().len(), 2);

    let resp = call(&mut core, "keys.add", json!({ "key": "home_title" }));
    assert_eq!(resp["status"], "error");

    let resp = call(&mut core, "translation.write", json!({ "path": de, "text": "Startseite" }));
    assert_eq!(resp["payload"]["rows"][1]["text"], "Startseite");

    let resp = call(&mut core, "placeholder.write", json!({ "path": en, "json": "not json" }));
    assert_eq!(resp["payload"]["outcome"], "discarded");

    let resp = call(&mut core, "keys.sync", Value::Null);
    assert_eq!(resp["payload"]["filled"], 1);

    let resp = call(&mut core, "keys.remove", Value::Null);
    assert_eq!(resp["payload"]["removed"], "home_title");

    let resp = call(&mut core, "qa.run", Value::Null);
    assert!(resp["payload"]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["code"] == "EMPTY_TRANSLATION"));
}

#[test]
fn gen_l10n_without_project_path_is_an_error() {
    let mut core = Core::new(CoreConfig::default());
    let resp = call(&mut core, "gen_l10n.run", Value::Null);
    assert_eq!(resp["status"], "error");
}

#[test]
fn settings_and_project_commands() {
    let dir = tempfile::tempdir().unwrap();
    let en = write(dir.path(), "en.arb", r#"{"@@locale":"en","a":"A"}"#);
    let bundle = dir.path().join("demo.aep").to_string_lossy().to_string();

    let mut core = Core::new(CoreConfig::default());
    call(&mut core, "files.add", json!({ "paths": [en] }));

    let resp = call(
        &mut core,
        "settings.set",
        json!({ "sort_keys_on_save": true, "project_name": "Demo" }),
    );
    assert_eq!(resp["payload"]["settings"]["sort_keys_on_save"], true);

    let resp = call(&mut core, "project.save", json!({ "path": bundle }));
    assert_eq!(resp["payload"]["project"]["projectName"], "Demo");
    assert_eq!(resp["payload"]["project"]["arbFilePaths"], json!([en]));

    call(&mut core, "project.new", Value::Null);
    let resp = call(&mut core, "files.list", Value::Null);
    assert!(resp["payload"]["files"].as_array().unwrap().is_empty());

    let resp = call(&mut core, "project.open", json!({ "path": bundle }));
    assert_eq!(resp["status"], "ok");
    assert_eq!(resp["payload"]["files"][0]["language_code"], "en");
    assert_eq!(resp["payload"]["settings"]["project_name"], "Demo");
}
