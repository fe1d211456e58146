// Tests for `wiretag coverage`

use crate::common::{code, initialized_tree, json, stdout, wiretag, write_file, PUBLIC_KEY_GO, USER_GROUP_GO};

const LDAP_CONFIG_GO: &str = "package ldap\n\ntype Config struct {\n\tHost string `json:\"host\"`\n}\n";

const REGISTRY: &str = r#"{ "entries": [ { "type": "identity.PublicKey" }, { "type": "ldap.UserGroup" } ] }"#;

fn tree() -> tempfile::TempDir {
    initialized_tree(
        &[
            ("pkg/identity/key.go", PUBLIC_KEY_GO),
            ("pkg/ldap/group.go", USER_GROUP_GO),
            ("pkg/ldap/config.go", LDAP_CONFIG_GO),
            ("pkg/ldap/config_test.go", "package ldap\n\ntype fixture struct{}\n\ntype Golden struct{}\n"),
        ],
        REGISTRY,
    )
}

#[test]
/// An unregistered exported struct is a gap, with a paste-ready entry.
fn test_coverage_reports_gap() {
    let dir = tree();
    let out = wiretag(dir.path(), &["coverage"]);
    assert_eq!(code(&out), 1);
    let text = stdout(&out);
    assert!(
        text.starts_with("error[T003]: exported struct ldap.Config has no registry entry\n  --> pkg/ldap/config.go:3\n"),
        "{text}"
    );
    assert!(text.contains(r#"= fix: add { "type": "ldap.Config", "policy": {} }"#), "{text}");
    assert!(!text.contains("ldap.Golden"), "test files are not scanned: {text}");
    assert!(text.ends_with("\n1 unregistered type(s) of 3 discovered in 3 file(s)\n"), "{text}");
}

#[test]
fn test_coverage_json_output() {
    let dir = tree();
    let out = wiretag(dir.path(), &["coverage", "--json"]);
    assert_eq!(code(&out), 1);
    let value = json(&out);
    assert_eq!(value["command"], "coverage");
    assert_eq!(value["files_scanned"], 3);
    assert_eq!(value["gaps"][0]["type_name"], "ldap.Config");
    assert_eq!(value["gaps"][0]["line"], 3);
    assert_eq!(value["unconstructed"], serde_json::json!([]));
}

#[test]
/// Registering the gap makes coverage clean and silent.
fn test_coverage_clean_after_registering() {
    let dir = tree();
    write_file(
        dir.path(),
        ".wiretag/registry.json",
        r#"{ "entries": [ { "type": "identity.PublicKey" }, { "type": "ldap.UserGroup" }, { "type": "ldap.Config" } ] }"#,
    );
    let out = wiretag(dir.path(), &["coverage"]);
    assert_eq!(code(&out), 0);
    assert!(stdout(&out).is_empty());
}

#[test]
/// `exclude_files` keeps the excluded file out of the scan.
fn test_coverage_respects_exclude_files() {
    let dir = tree();
    write_file(
        dir.path(),
        ".wiretag/wiretag.json",
        r#"{ "version": "0.1.0", "exclude_files": ["pkg/ldap/config.go"] }"#,
    );
    let out = wiretag(dir.path(), &["coverage", "--json"]);
    assert_eq!(code(&out), 0, "{}", stdout(&out));
    assert_eq!(json(&out)["files_scanned"], 2);
}

#[test]
/// Syntax mode also sees structs declared in a grouped `type ( ... )` block.
fn test_coverage_syntax_mode_sees_grouped_declarations() {
    let dir = tree();
    write_file(
        dir.path(),
        "pkg/ldap/grouped.go",
        "package ldap\n\ntype (\n\tFilter struct {\n\t\tQuery string `json:\"query\"`\n\t}\n)\n",
    );

    let heuristic = json(&wiretag(dir.path(), &["coverage", "--json"]));
    let names: Vec<_> = heuristic["gaps"].as_array().unwrap().iter().map(|g| g["type_name"].clone()).collect();
    assert_eq!(names, vec!["ldap.Config"]);

    write_file(dir.path(), ".wiretag/wiretag.json", r#"{ "version": "0.1.0", "scan_mode": "syntax" }"#);
    let syntax = json(&wiretag(dir.path(), &["coverage", "--json"]));
    let names: Vec<_> = syntax["gaps"].as_array().unwrap().iter().map(|g| g["type_name"].clone()).collect();
    assert_eq!(names, vec!["ldap.Config", "ldap.Filter"]);
}
