//! Line-oriented discovery of exported struct declarations.
//!
//! Not a Go parser: after the first `package <name>` line, any line starting
//! with the `type` keyword and mentioning `struct` declares a struct whose
//! name is the second token. Structs inside grouped `type ( ... )` blocks
//! are not seen; use the syntax mode for those.
//!
//! Only unindented declarations count: gofmt indents every declaration
//! inside a function body, and the source index keeps top-level types only.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use wiretag_core::types::{is_exported, DiscoveredType};

use crate::error::ScanError;

/// Exported struct types declared in one file.
///
/// The handle is dropped when this returns, whether or not a read failed.
pub fn scan_file(path: &Path) -> Result<Vec<DiscoveredType>, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    scan_reader(BufReader::new(file), path).map_err(|e| ScanError::io(path, e))
}

pub fn scan_reader<R: BufRead>(reader: R, path: &Path) -> io::Result<Vec<DiscoveredType>> {
    let mut package: Option<String> = None;
    let mut found = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let indented = line.starts_with(char::is_whitespace);
        let line = line.trim();

        let Some(pkg) = package.as_deref() else {
            if is_generated_header(line) {
                tracing::debug!("skipping generated file {}", path.display());
                return Ok(Vec::new());
            }
            package = package_name(line).map(str::to_string);
            continue;
        };

        if indented {
            continue;
        }
        if let Some(name) = struct_name(line) {
            if is_exported(name) {
                found.push(DiscoveredType::new(pkg, name, path, idx as u32 + 1));
            }
        }
    }

    Ok(found)
}

/// `package foo` -> `foo`.
pub fn package_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("package ")?;
    rest.split_whitespace().next()
}

/// `type Foo struct {` -> `Foo`; generic parameter lists are stripped.
pub fn struct_name(line: &str) -> Option<&str> {
    if !line.starts_with("type ") || !line.contains("struct") {
        return None;
    }
    let token = line.split_whitespace().nth(1)?;
    let name = token.split('[').next().unwrap_or(token);
    if name.is_empty() || name == "(" {
        return None;
    }
    Some(name)
}

/// Go's generated-code marker: `// Code generated ... DO NOT EDIT.`
pub fn is_generated_header(line: &str) -> bool {
    line.starts_with("// Code generated ") && line.ends_with(" DO NOT EDIT.")
}

/// Whether a source file carries the generated-code marker before its
/// package clause.
pub fn is_generated(source: &str) -> bool {
    for line in source.lines() {
        let line = line.trim();
        if package_name(line).is_some() {
            return false;
        }
        if is_generated_header(line) {
            return true;
        }
    }
    false
}
