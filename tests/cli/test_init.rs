// Tests for `wiretag init`

use std::fs;

use crate::common::{code, go_tree, stdout, wiretag};

#[test]
/// Init creates the config and an empty registry, and prints nothing.
fn test_init_creates_wiretag_dir() {
    let dir = go_tree(&[]);
    let out = wiretag(dir.path(), &["init"]);
    assert_eq!(code(&out), 0);
    assert!(stdout(&out).is_empty());

    let config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(".wiretag/wiretag.json")).unwrap()).unwrap();
    assert_eq!(config["tag_keys"], serde_json::json!(["json"]));
    assert_eq!(config["scan_mode"], "heuristic");

    let registry: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(".wiretag/registry.json")).unwrap()).unwrap();
    assert_eq!(registry["entries"], serde_json::json!([]));
}

#[test]
/// A second init refuses to overwrite and exits 2.
fn test_init_twice_is_an_error() {
    let dir = go_tree(&[]);
    assert_eq!(code(&wiretag(dir.path(), &["init"])), 0);
    fs::write(dir.path().join(".wiretag/registry.json"), r#"{ "entries": [ { "type": "a.T" } ] }"#).unwrap();

    let out = wiretag(dir.path(), &["init"]);
    assert_eq!(code(&out), 2);
    let registry = fs::read_to_string(dir.path().join(".wiretag/registry.json")).unwrap();
    assert!(registry.contains("a.T"), "registry was overwritten");
}

#[test]
/// `--root` points init at another directory.
fn test_init_with_root_flag() {
    let cwd = go_tree(&[]);
    let target = go_tree(&[]);
    let out = wiretag(cwd.path(), &["init", "--root", target.path().to_str().unwrap()]);
    assert_eq!(code(&out), 0);
    assert!(target.path().join(".wiretag/wiretag.json").is_file());
    assert!(!cwd.path().join(".wiretag").exists());
}
