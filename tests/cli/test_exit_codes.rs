// Tests for CLI exit code behavior

use crate::common::{code, go_tree, initialized_tree, stdout, wiretag, write_file, USER_GROUP_GO};

#[test]
/// Every tree-reading command exits 2 before `wiretag init`.
fn test_exit_code_2_when_not_initialized() {
    let dir = go_tree(&[("pkg/ldap/group.go", USER_GROUP_GO)]);
    for command in ["check", "coverage", "audit"] {
        let out = wiretag(dir.path(), &[command]);
        assert_eq!(code(&out), 2, "{command}");
        assert!(stdout(&out).is_empty(), "{command}");
    }
}

#[test]
/// A malformed registry is an operational error, not a finding.
fn test_exit_code_2_on_malformed_registry() {
    let dir = initialized_tree(&[("pkg/ldap/group.go", USER_GROUP_GO)], "{ \"entries\": [ ");
    assert_eq!(code(&wiretag(dir.path(), &["check"])), 2);
    assert_eq!(code(&wiretag(dir.path(), &["audit"])), 2);
}

#[test]
fn test_exit_code_2_on_duplicate_registry_entry() {
    let dir = initialized_tree(
        &[("pkg/ldap/group.go", USER_GROUP_GO)],
        r#"{ "entries": [ { "type": "ldap.UserGroup" }, { "type": "ldap.UserGroup" } ] }"#,
    );
    assert_eq!(code(&wiretag(dir.path(), &["check"])), 2);
}

#[test]
/// Registering a non-struct type is a configuration mistake.
fn test_exit_code_2_on_registered_non_struct() {
    let dir = initialized_tree(
        &[("pkg/ldap/group.go", USER_GROUP_GO)],
        r#"{ "entries": [ { "type": "ldap.Kind" } ] }"#,
    );
    assert_eq!(code(&wiretag(dir.path(), &["check"])), 2);
}

#[test]
/// A broken config falls back to defaults rather than failing.
fn test_malformed_config_is_lenient() {
    let dir = initialized_tree(
        &[("pkg/ldap/group.go", USER_GROUP_GO)],
        r#"{ "entries": [ { "type": "ldap.UserGroup", "policy": { "allow_field_mismatch": true, "allowed_fields": ["dn"] } } ] }"#,
    );
    write_file(dir.path(), ".wiretag/wiretag.json", "{ not json");
    assert_eq!(code(&wiretag(dir.path(), &["check"])), 0);
}

#[test]
/// Findings exit 1, clean runs exit 0.
fn test_exit_code_0_and_1() {
    let dir = initialized_tree(
        &[("pkg/ldap/group.go", USER_GROUP_GO)],
        r#"{ "entries": [ { "type": "ldap.UserGroup" } ] }"#,
    );
    assert_eq!(code(&wiretag(dir.path(), &["check"])), 1);

    write_file(
        dir.path(),
        ".wiretag/registry.json",
        r#"{ "entries": [ { "type": "ldap.UserGroup", "policy": { "disable_mismatch": true } } ] }"#,
    );
    assert_eq!(code(&wiretag(dir.path(), &["check"])), 0);
}
