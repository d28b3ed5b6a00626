mod common;

use common::TempoTest;

#[test]
fn test_config_show_defaults() {
    let t = TempoTest::new();
    let out = t.run_success(&["config", "show"]);
    assert!(out.contains("data_path = .tempo/data.json"));
    assert!(out.contains("clipboard.enabled = true"));
}

#[test]
fn test_config_set_and_get() {
    let t = TempoTest::new();

    t.run_success(&["config", "set", "clipboard.enabled", "false"]);
    let out = t.run_success(&["config", "get", "clipboard.enabled"]);
    assert_eq!(out.trim(), "false");

    t.run_success(&["config", "set", "data_path", "elsewhere/track.json"]);
    let out = t.run_success(&["config", "get", "data_path"]);
    assert_eq!(out.trim(), "elsewhere/track.json");

    // The data path override is honored by the tracker
    t.run_success(&["main", "add", "Routed"]);
    assert!(t.temp_dir.path().join("elsewhere/track.json").exists());
    assert!(!t.data_exists());
}

#[test]
fn test_config_show_json() {
    let t = TempoTest::new();
    let out = t.run_success(&["config", "show", "--json"]);
    let v: serde_json::Value = serde_json::from_str(&out).expect("invalid JSON");
    assert_eq!(v["clipboard"]["enabled"], true);
    assert!(v["data_path"].is_string());
}

#[test]
fn test_config_rejects_unknown_key() {
    let t = TempoTest::new();
    let err = t.run_failure(&["config", "get", "nope"]);
    assert!(err.contains("unknown key"));
    let err = t.run_failure(&["config", "set", "nope", "1"]);
    assert!(err.contains("unknown key"));
}

#[test]
fn test_config_rejects_bad_boolean() {
    let t = TempoTest::new();
    let err = t.run_failure(&["config", "set", "clipboard.enabled", "maybe"]);
    assert!(err.contains("clipboard.enabled"));
}
