// Tests for `wiretag audit`

use crate::common::{
    code, initialized_tree, json, stdout, wiretag, PUBLIC_KEY_FIXED_GO, PUBLIC_KEY_GO, USER_GROUP_GO,
};

const REGISTRY: &str = r#"{
  "entries": [
    { "type": "identity.PublicKey" },
    { "type": "ldap.UserGroup", "policy": { "allow_field_mismatch": true, "allowed_fields": { "dn": true } } }
  ]
}"#;

#[test]
/// A fully registered, correctly tagged tree audits clean.
fn test_audit_clean_tree() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_FIXED_GO), ("pkg/ldap/group.go", USER_GROUP_GO)],
        REGISTRY,
    );
    let out = wiretag(dir.path(), &["audit"]);
    assert_eq!(code(&out), 0, "{}", stdout(&out));
    assert!(stdout(&out).is_empty());
}

#[test]
/// Check findings alone fail the audit.
fn test_audit_fails_on_violation() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_GO), ("pkg/ldap/group.go", USER_GROUP_GO)],
        REGISTRY,
    );
    let out = wiretag(dir.path(), &["audit"]);
    assert_eq!(code(&out), 1);
    let text = stdout(&out);
    assert!(text.contains("error[T002]: identity.PublicKey"), "{text}");
    assert!(!text.contains("error[T003]"), "{text}");
}

#[test]
/// Coverage findings alone fail the audit.
fn test_audit_fails_on_gap() {
    let dir = initialized_tree(
        &[
            ("pkg/identity/key.go", PUBLIC_KEY_FIXED_GO),
            ("pkg/ldap/group.go", USER_GROUP_GO),
            ("pkg/kms/signer.go", "package kms\n\ntype SignRequest struct {\n\tKeyID string `json:\"key_id\"`\n}\n"),
        ],
        REGISTRY,
    );
    let out = wiretag(dir.path(), &["audit", "--json"]);
    assert_eq!(code(&out), 1);
    let value = json(&out);
    assert_eq!(value["command"], "audit");
    assert_eq!(value["status"], "error");
    assert_eq!(value["check"]["status"], "ok");
    assert_eq!(value["coverage"]["gaps"][0]["type_name"], "kms.SignRequest");
}

#[test]
/// A disabled entry passes however its fields are tagged.
fn test_audit_disabled_entry() {
    let dir = initialized_tree(
        &[("pkg/identity/key.go", PUBLIC_KEY_GO)],
        r#"{ "entries": [ { "type": "identity.PublicKey", "policy": { "disabled": true } } ] }"#,
    );
    assert_eq!(code(&wiretag(dir.path(), &["audit"])), 0);
}
