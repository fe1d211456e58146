// Coverage discovery over generated trees: heuristic and syntax modes.

use wiretag_core::config::ScanMode;
use wiretag_enforce::audit::{Auditor, SourceIndex};
use wiretag_enforce::coverage::CoverageScanner;
use wiretag_parsers::{SourceWalker, WalkOptions};

use crate::common::{go_tree, write_file};

const HANDLER_GO: &str = "package api\n\nfunc Handle() {\n\ttype Payload struct {\n\t\tID string\n\t}\n\t_ = Payload{}\n}\n\ntype Request struct {\n\tID string `json:\"id\"`\n}\n";

fn tree() -> tempfile::TempDir {
    go_tree(&[
        ("api/v1/types.go", "package v1\n\ntype Page[T any] struct {\n\tItems []T `json:\"items\"`\n}\n\ntype cursor struct{}\n"),
        (
            "api/v1/zz_generated.go",
            "// Code generated by protoc-gen-go. DO NOT EDIT.\n\npackage v1\n\ntype Envelope struct{}\n",
        ),
        ("internal/audit/tag.go", "package audit\n\ntype Options struct{}\n"),
        ("vendor/github.com/x/y/y.go", "package y\n\ntype Vendored struct{}\n"),
        ("pkg/kms/group.go", "package kms\n\ntype (\n\tKey struct{}\n\tKeyID string\n)\n\ntype Signer interface{}\n"),
    ])
}

fn names(scanner: &CoverageScanner, root: &std::path::Path) -> Vec<String> {
    scanner
        .scan(root)
        .unwrap()
        .into_iter()
        .map(|d| d.qualified_name)
        .collect()
}

#[test]
/// Generated, vendored, excluded, and unexported types are skipped.
fn test_heuristic_discovery() {
    let dir = tree();
    let scanner = CoverageScanner::new(WalkOptions::new(vec!["/internal/audit/".into()], vec![]));
    assert_eq!(names(&scanner, dir.path()), vec!["v1.Page"]);
}

#[test]
/// Syntax mode agrees and additionally sees grouped declarations.
fn test_syntax_discovery() {
    let dir = tree();
    let scanner = CoverageScanner::new(WalkOptions::new(vec!["/internal/audit/".into()], vec![]))
        .with_mode(ScanMode::Syntax);
    assert_eq!(names(&scanner, dir.path()), vec!["v1.Page", "kms.Key"]);
}

#[test]
/// Glob ignore patterns exclude matching files.
fn test_ignore_patterns() {
    let dir = tree();
    let options = WalkOptions::default()
        .with_ignore_patterns(&["api/**".to_string()])
        .unwrap();
    let summary = CoverageScanner::new(options).scan_tree(dir.path()).unwrap();
    assert_eq!(summary.files_scanned, 2);
    let found: Vec<_> = summary.discovered.iter().map(|d| d.qualified_name.as_str()).collect();
    assert_eq!(found, vec!["audit.Options"]);
}

#[test]
/// Every name coverage discovers, in either mode, resolves in the source index.
fn test_discovered_types_resolve_in_index() {
    let dir = tree();
    write_file(dir.path(), "api/handler.go", HANDLER_GO);
    let files = SourceWalker::new(dir.path(), WalkOptions::default()).walk().unwrap();
    let index = SourceIndex::build(dir.path(), &files).unwrap();

    for mode in [ScanMode::Heuristic, ScanMode::Syntax] {
        let found = names(&CoverageScanner::default().with_mode(mode), dir.path());
        assert!(found.contains(&"api.Request".to_string()), "{mode:?}: {found:?}");
        assert!(!found.contains(&"api.Payload".to_string()), "{mode:?}: {found:?}");
        for name in &found {
            assert!(index.get(name).is_some(), "{mode:?}: {name} discovered but not indexed");
        }
    }
}

#[test]
/// A tree with a function-local struct can be audited clean.
fn test_local_struct_does_not_block_audit() {
    let dir = go_tree(&[("api/handler.go", HANDLER_GO)]);
    write_file(dir.path(), ".wiretag/registry.json", r#"{ "entries": [ { "type": "api.Request" } ] }"#);
    let auditor = Auditor::load(dir.path(), &dir.path().join(".wiretag")).unwrap();
    let result = auditor.audit().unwrap();
    assert!(result.is_clean(), "{:?} {:?}", result.check.unresolved, result.coverage.gaps);

    // Registering the local type is harmless once it is disabled.
    write_file(
        dir.path(),
        ".wiretag/registry.json",
        r#"{ "entries": [ { "type": "api.Request" }, { "type": "api.Payload", "policy": { "disabled": true } } ] }"#,
    );
    let auditor = Auditor::load(dir.path(), &dir.path().join(".wiretag")).unwrap();
    assert!(auditor.audit().unwrap().is_clean());
}
