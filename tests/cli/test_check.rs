// Tests for `wiretag check`

use crate::common::{
    code, initialized_tree, json, stdout, wiretag, PUBLIC_KEY_FIXED_GO, PUBLIC_KEY_GO, USER_GROUP_GO,
};

const REGISTRY: &str = r#"{
  "entries": [
    { "type": "identity.PublicKey" },
    { "type": "ldap.UserGroup", "policy": { "allow_field_mismatch": true, "allowed_fields": ["dn"] } }
  ]
}"#;

#[test]
/// The FingerprintMD5 mismatch is reported with location and exit 1.
fn test_check_reports_mismatch() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_GO), ("pkg/ldap/group.go", USER_GROUP_GO)],
        REGISTRY,
    );
    let out = wiretag(dir.path(), &["check"]);
    assert_eq!(code(&out), 1);
    let text = stdout(&out);
    assert!(
        text.contains("error[T002]: identity.PublicKey: tag mismatch for field `FingerprintMD5`: declared `fingerprintmd5`, expected `fingerprint_md5`"),
        "{text}"
    );
    assert!(text.contains("  --> pkg/identity/key.go:6\n"), "{text}");
    assert!(text.ends_with("\n1 violation(s) in 1 of 2 type(s), 0 unresolved\n"), "{text}");
}

#[test]
/// Once fixed, check is silent and exits 0.
fn test_check_clean_is_silent() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_FIXED_GO), ("pkg/ldap/group.go", USER_GROUP_GO)],
        REGISTRY,
    );
    let out = wiretag(dir.path(), &["check"]);
    assert_eq!(code(&out), 0);
    assert!(stdout(&out).is_empty());
}

#[test]
/// Naming types restricts the check to them.
fn test_check_named_types_only() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_GO), ("pkg/ldap/group.go", USER_GROUP_GO)],
        REGISTRY,
    );
    assert_eq!(code(&wiretag(dir.path(), &["check", "ldap.UserGroup"])), 0);
    assert_eq!(code(&wiretag(dir.path(), &["check", "identity.PublicKey"])), 1);
}

#[test]
/// A requested type with no registry entry fails.
fn test_check_unknown_type() {
    let dir = initialized_tree(&[("pkg/ldap/group.go", USER_GROUP_GO)], REGISTRY);
    let out = wiretag(dir.path(), &["check", "--json", "ldap.Missing"]);
    assert_eq!(code(&out), 1);
    let value = json(&out);
    assert_eq!(value["unknown"], serde_json::json!(["ldap.Missing"]));
}

#[test]
fn test_check_json_output() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_GO), ("pkg/ldap/group.go", USER_GROUP_GO)],
        REGISTRY,
    );
    let out = wiretag(dir.path(), &["check", "--json"]);
    assert_eq!(code(&out), 1);
    let value = json(&out);
    assert_eq!(value["version"], "0.1.0");
    assert_eq!(value["command"], "check");
    assert_eq!(value["status"], "error");
    assert_eq!(value["unresolved"], serde_json::json!([]));
    let violation = &value["reports"][0]["violations"][0];
    assert_eq!(violation["code"], "T002");
    assert_eq!(violation["class"], "mismatch");
    assert_eq!(violation["field"], "FingerprintMD5");
    assert_eq!(violation["expected"], "fingerprint_md5");
}

#[test]
/// A registry entry matching no struct in source fails the check.
fn test_check_unresolved_entry() {
    let dir = initialized_tree(&[("pkg/ldap/group.go", USER_GROUP_GO)], REGISTRY);
    let out = wiretag(dir.path(), &["check"]);
    assert_eq!(code(&out), 1);
    assert!(stdout(&out).contains("error[T005]: registry entry identity.PublicKey does not match any struct"));
}
