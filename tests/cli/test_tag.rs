// Tests for `wiretag tag`

use crate::common::{code, go_tree, json, stdout, wiretag, write_file};

#[test]
/// Works without `.wiretag/` and prints an aligned table.
fn test_tag_prints_expected_names() {
    let dir = go_tree(&[]);
    let out = wiretag(dir.path(), &["tag", "FingerprintMD5", "OpenSSHKey", "UserIDs"]);
    assert_eq!(code(&out), 0);
    assert_eq!(
        stdout(&out),
        "FingerprintMD5  fingerprint_md5\nOpenSSHKey      openssh_key\nUserIDs         user_ids\n"
    );
}

#[test]
fn test_tag_json_output() {
    let dir = go_tree(&[]);
    let out = wiretag(dir.path(), &["tag", "--json", "TokenTTL"]);
    assert_eq!(code(&out), 0);
    let value = json(&out);
    assert_eq!(value["command"], "tag");
    assert_eq!(value["tags"][0]["identifier"], "TokenTTL");
    assert_eq!(value["tags"][0]["expected"], "token_ttl");
}

#[test]
/// Project acronyms from `.wiretag/wiretag.json` change the result.
fn test_tag_uses_project_acronyms() {
    let dir = go_tree(&[]);
    assert_eq!(stdout(&wiretag(dir.path(), &["tag", "BaseDN"])), "BaseDN  base_d_n\n");

    write_file(
        dir.path(),
        ".wiretag/wiretag.json",
        r#"{ "version": "0.1.0", "acronyms": ["DN"] }"#,
    );
    assert_eq!(stdout(&wiretag(dir.path(), &["tag", "BaseDN"])), "BaseDN  base_dn\n");
}

#[test]
/// No identifiers is a usage error.
fn test_tag_requires_identifier() {
    let dir = go_tree(&[]);
    assert_eq!(code(&wiretag(dir.path(), &["tag"])), 2);
    assert_eq!(code(&wiretag(dir.path(), &["tag", ""])), 2);
}
