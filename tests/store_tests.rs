//! Integration tests for layered configuration resolution and the store
//! facade. Environment-override precedence is covered separately in
//! `env_override_tests.rs` because it mutates the process environment.

use sensornet::config::{ConfigStore, Kind, Profile, Schema};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn file_values_resolve_through_get() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "mqtt:\n  host: 10.0.0.5\n  port: 1883\nclient_id: station_7\n",
    );

    let store = ConfigStore::load(&path).unwrap();
    assert_eq!(store.get("mqtt.host"), Some(json!("10.0.0.5")));
    assert_eq!(store.get_i64("mqtt.port"), Some(1883));
    assert_eq!(store.get_str("client_id"), Some("station_7".to_string()));
}

#[test]
fn missing_file_uses_profile_defaults() {
    let dir = TempDir::new().unwrap();
    let store =
        ConfigStore::load_with_profile(dir.path().join("absent.yaml"), Profile::Client).unwrap();

    // client profile default sensor_pin=4 applies
    assert_eq!(store.get_i64("sensor_pin"), Some(4));
    assert_eq!(store.get_str("sensor_type"), Some("DHT11".to_string()));
    assert_eq!(store.get_bool("mqtt.use_tls"), Some(true));
}

#[test]
fn file_values_win_over_profile_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "sensor_pin: 17\n");

    let store = ConfigStore::load_with_profile(&path, Profile::Client).unwrap();
    assert_eq!(store.get_i64("sensor_pin"), Some(17));
    // keys the file omits still come from the profile
    assert_eq!(store.get_i64("update_interval"), Some(30));
}

#[test]
fn caller_default_is_last_resort() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "client_id: c1\n");

    let store = ConfigStore::load(&path).unwrap();
    assert_eq!(store.get_or("not.covered.anywhere", json!("fallback")), json!("fallback"));
}

#[test]
fn set_then_get_without_file_io() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "dashboard:\n  host: 0.0.0.0\n");

    let store = ConfigStore::load(&path).unwrap();
    store.set("dashboard.port", json!(9090)).unwrap();
    assert_eq!(store.get_i64("dashboard.port"), Some(9090));

    // the file on disk is untouched
    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(!on_disk.contains("9090"));
}

#[test]
fn save_then_reload_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "mqtt:\n  host: broker.local\n  port: 1883\n  use_tls: false\nupdate_interval: 45\n",
    );

    let store = ConfigStore::load(&path).unwrap();
    store.set("client_id", json!("saved_client")).unwrap();
    let before = store.snapshot();

    store.save().unwrap();
    store.reload().unwrap();

    // every key present before save is present and equal after
    assert_eq!(store.snapshot().as_ref(), before.as_ref());

    // and a fresh store from the same path agrees
    let fresh = ConfigStore::load(&path).unwrap();
    assert_eq!(fresh.get("mqtt.port"), Some(json!(1883)));
    assert_eq!(fresh.get("mqtt.use_tls"), Some(json!(false)));
    assert_eq!(fresh.get("client_id"), Some(json!("saved_client")));
    assert_eq!(fresh.get("update_interval"), Some(json!(45)));
}

#[test]
fn reload_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mqtt:\n  host: h\nupdate_interval: 30\n");

    let store = ConfigStore::load_with_profile(&path, Profile::Host).unwrap();
    store.reload().unwrap();
    let first = store.snapshot();
    store.reload().unwrap();
    let second = store.snapshot();

    assert_eq!(first.as_ref(), second.as_ref());
}

#[test]
fn get_is_total_over_degenerate_paths() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mqtt:\n  host: h\n");

    let store = ConfigStore::load(&path).unwrap();
    for key in ["", ".", "..", "mqtt.host.below", "a.b.c.d.e", "mqtt..host"] {
        assert_eq!(store.get_or(key, json!("dflt")), json!("dflt"), "path {key:?}");
    }
}

#[test]
fn validation_missing_key_fails() {
    let dir = TempDir::new().unwrap();
    // mqtt section present but without the required port key
    let path = write_config(&dir, "mqtt:\n  host: h\n");

    let store = ConfigStore::load(&path).unwrap();
    let schema = Schema::new().map(
        "mqtt",
        Schema::new().key("host", Kind::Str).key("port", Kind::Int),
    );
    assert!(!store.validate(&schema));
}

#[test]
fn validation_allows_extra_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mqtt:\n  host: h\n  port: 1883\n  extra: 1\nunlisted: yes\n");

    let store = ConfigStore::load(&path).unwrap();
    let schema = Schema::new().map(
        "mqtt",
        Schema::new().key("host", Kind::Str).key("port", Kind::Int),
    );
    assert!(store.validate(&schema));
}

#[test]
fn validation_failure_does_not_mutate_tree() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mqtt:\n  host: h\n");

    let store = ConfigStore::load(&path).unwrap();
    let before = store.snapshot();
    let schema = Schema::new().map("mqtt", Schema::new().key("port", Kind::Int));
    assert!(!store.validate(&schema));
    assert_eq!(store.snapshot().as_ref(), before.as_ref());
}

#[test]
fn malformed_file_aborts_construction() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mqtt: {host: [broken\n");
    assert!(ConfigStore::load(&path).is_err());
}

#[test]
fn lists_and_nested_blocks_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "sensors:\n  - name: s1\n    pin: 4\n  - name: s2\n    pin: 17\nnested:\n  deep:\n    flag: true\n",
    );

    let store = ConfigStore::load(&path).unwrap();
    let out = dir.path().join("copy.yaml");
    store.save_to(&out).unwrap();

    let copy = ConfigStore::load(&out).unwrap();
    assert_eq!(
        copy.get("sensors"),
        Some(json!([{"name": "s1", "pin": 4}, {"name": "s2", "pin": 17}]))
    );
    assert_eq!(copy.get("nested.deep.flag"), Some(Value::Bool(true)));
}

#[test]
fn section_returns_full_merged_mapping() {
    let dir = TempDir::new().unwrap();
    let store =
        ConfigStore::load_with_profile(dir.path().join("none.yaml"), Profile::Host).unwrap();

    let mqtt = store.section("mqtt");
    assert!(mqtt.contains_key("host"));
    assert!(mqtt.contains_key("port"));

    let database = store.section("database");
    assert_eq!(database.get("path"), Some(&json!("data/sensors.db")));
}
