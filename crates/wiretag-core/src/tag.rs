//! Go struct tag parsing.
//!
//! A raw tag looks like `json:"name,omitempty" yaml:"name"`. Lookup follows
//! the conventional `key:"value"` grammar: keys are separated by spaces and
//! each value is a double-quoted string; parsing stops at the first
//! malformed pair.

use serde::{Deserialize, Serialize};

/// The value declared for one tag key, split into the name and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    pub name: String,
    pub options: Vec<String>,
}

impl TagValue {
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default().to_string();
        let options = parts.map(str::to_string).collect();
        Self { name, options }
    }

    /// `json:"-"` keeps the field out of the wire format entirely.
    pub fn is_excluded(&self) -> bool {
        self.name == "-" && self.options.is_empty()
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Look up the value for `key` in a raw struct tag.
pub fn lookup(raw: &str, key: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        let name_start = pos;
        while pos < bytes.len() && bytes[pos] > b' ' && bytes[pos] != b':' && bytes[pos] != b'"' {
            pos += 1;
        }
        if pos == name_start || pos + 1 >= bytes.len() || bytes[pos] != b':' || bytes[pos + 1] != b'"' {
            break;
        }
        let name = &raw[name_start..pos];
        pos += 1;

        let value_start = pos;
        pos += 1;
        while pos < bytes.len() && bytes[pos] != b'"' {
            if bytes[pos] == b'\\' {
                pos += 1;
            }
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        let quoted = &raw[value_start..=pos];
        pos += 1;

        if name == key {
            return unquote(quoted);
        }
    }

    None
}

/// Parsed value for `key`, if the raw tag declares it.
pub fn lookup_value(raw: &str, key: &str) -> Option<TagValue> {
    lookup(raw, key).map(|v| TagValue::parse(&v))
}

/// Keys declared in a raw tag, in order.
pub fn keys(raw: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = raw.trim_start();
    while let Some(colon) = rest.find(":\"") {
        let name = &rest[..colon];
        if name.is_empty() || name.contains(' ') {
            break;
        }
        let after = &rest[colon + 2..];
        let Some(end) = closing_quote(after) else {
            break;
        };
        found.push(name.to_string());
        rest = after[end + 1..].trim_start();
    }
    found
}

fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Unquote a double-quoted Go string literal.
fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            other => out.push(other),
        }
    }
    Some(out)
}

/// Render a tag literal declaring `name` under every key, e.g.
/// `` `json:"name" yaml:"name"` ``.
pub fn render(keys: &[String], name: &str) -> String {
    let pairs: Vec<String> = keys.iter().map(|k| format!("{k}:\"{name}\"")).collect();
    format!("`{}`", pairs.join(" "))
}
