//! Go struct extraction.
//!
//! Turns a Go source file into [`TypeDescriptor`]s: every top-level named
//! type, with field identifiers, raw tags and kinds for struct types. This
//! is how Go sources gain the `Describe` capability.

use std::path::{Path, PathBuf};

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use wiretag_core::types::{is_exported, DiscoveredType, FieldDescriptor, FieldKind, TypeDescriptor};

use crate::error::{ParseError, ScanError};
use crate::heuristic;
use crate::treesitter::{self, line_of, node_text};

const PRIMITIVES: &[&str] = &[
    "bool", "string", "byte", "rune", "int", "int8", "int16", "int32", "int64", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128",
];

/// Everything extracted from one Go file.
#[derive(Debug, Clone, Default)]
pub struct GoFile {
    pub path: PathBuf,
    pub package: Option<String>,
    /// Top-level named types in declaration order, named `package.Type`.
    pub types: Vec<TypeDescriptor>,
    /// Carries the `// Code generated ... DO NOT EDIT.` marker.
    pub generated: bool,
}

impl GoFile {
    pub fn exported_structs(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types
            .iter()
            .filter(|t| t.as_struct().is_some() && is_exported(short_name(&t.name)))
    }

    /// Exported structs as coverage discoveries. Generated files and files
    /// without a package clause contribute nothing.
    pub fn discovered(&self) -> Vec<DiscoveredType> {
        let Some(package) = self.package.as_deref() else {
            return Vec::new();
        };
        if self.generated {
            return Vec::new();
        }
        self.exported_structs()
            .map(|t| {
                let line = t.location.as_ref().map(|l| l.line).unwrap_or(0);
                DiscoveredType::new(package, short_name(&t.name), &self.path, line)
            })
            .collect()
    }

    pub fn find(&self, qualified_name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.name == qualified_name)
    }
}

fn short_name(qualified: &str) -> &str {
    qualified.rsplit_once('.').map(|(_, n)| n).unwrap_or(qualified)
}

/// Reusable parser. Not `Sync`; build one per worker thread.
pub struct GoStructParser {
    parser: Parser,
    query: Query,
}

impl GoStructParser {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            parser: treesitter::go_parser()?,
            query: treesitter::go_struct_query()?,
        })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<GoFile, ScanError> {
        let source = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        Ok(self.parse_source(path, &source)?)
    }

    pub fn parse_source(&mut self, path: &Path, source: &str) -> Result<GoFile, ParseError> {
        let tree = treesitter::parse(&mut self.parser, path, source)?;
        let bytes = source.as_bytes();
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("syntax errors in {}, extracting what parsed", path.display());
        }

        let mut package = None;
        let mut declared: Vec<(String, u32, Declared)> = Vec::new();

        let capture_names = self.query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, root, bytes);

        while let Some(m) = matches.next() {
            let mut name = None;
            let mut body = None;
            let mut spec = None;
            let mut alias = false;

            for cap in m.captures {
                match capture_names[cap.index as usize] {
                    "package" => {
                        if package.is_none() {
                            package = Some(node_text(cap.node, bytes).to_string());
                        }
                    }
                    "type.name" => name = Some(node_text(cap.node, bytes).to_string()),
                    "alias.name" => {
                        name = Some(node_text(cap.node, bytes).to_string());
                        alias = true;
                    }
                    "type.body" | "alias.body" => body = Some(cap.node),
                    "type.spec" | "alias.spec" => spec = Some(cap.node),
                    _ => {}
                }
            }

            let (Some(name), Some(body), Some(spec)) = (name, body, spec) else {
                continue;
            };
            if !is_top_level(spec) {
                continue;
            }
            let shape = if alias {
                Declared::Other("alias".to_string())
            } else if body.kind() == "struct_type" {
                Declared::Struct(struct_fields(body, bytes))
            } else {
                Declared::Other(other_kind(body).to_string())
            };
            declared.push((name, line_of(spec), shape));
        }

        let types = declared
            .into_iter()
            .map(|(name, line, shape)| {
                let qualified = match package.as_deref() {
                    Some(pkg) => format!("{pkg}.{name}"),
                    None => name,
                };
                let descriptor = match shape {
                    Declared::Struct(fields) => TypeDescriptor::structure(qualified, fields),
                    Declared::Other(kind) => TypeDescriptor::other(qualified, kind),
                };
                descriptor.at(path, line)
            })
            .collect();

        Ok(GoFile {
            path: path.to_path_buf(),
            package,
            types,
            generated: heuristic::is_generated(source),
        })
    }
}

enum Declared {
    Struct(Vec<FieldDescriptor>),
    Other(String),
}

/// `type_spec` -> `type_declaration` -> `source_file`. Types declared inside
/// function bodies are local and never serialized by name.
fn is_top_level(spec: Node<'_>) -> bool {
    spec.parent()
        .and_then(|decl| decl.parent())
        .is_some_and(|n| n.kind() == "source_file")
}

fn struct_fields(struct_type: Node<'_>, source: &[u8]) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    let mut walker = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut walker)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return fields;
    };

    let mut list_walker = list.walk();
    for decl in list.named_children(&mut list_walker) {
        if decl.kind() != "field_declaration" {
            continue;
        }
        let tag = decl
            .child_by_field_name("tag")
            .map(|t| unquote_tag(node_text(t, source), t.kind()));
        let Some(ty) = decl.child_by_field_name("type") else {
            continue;
        };

        let mut name_walker = decl.walk();
        let names: Vec<Node<'_>> = decl.children_by_field_name("name", &mut name_walker).collect();

        if names.is_empty() {
            if let Some(field) = embedded_field(decl, ty, source) {
                fields.push(with_tag(field, tag.as_deref()));
            }
            continue;
        }

        let kind = classify(ty, source);
        let type_text = node_text(ty, source);
        for name in names {
            let field = FieldDescriptor::new(node_text(name, source), type_text, kind).at_line(line_of(name));
            fields.push(with_tag(field, tag.as_deref()));
        }
    }
    fields
}

fn with_tag(field: FieldDescriptor, tag: Option<&str>) -> FieldDescriptor {
    match tag {
        Some(raw) => field.with_tag(raw),
        None => field,
    }
}

/// Embedded field: the identifier is the bare type name, `Base` for
/// `*pkg.Base` or `Base[T]`.
fn embedded_field(decl: Node<'_>, ty: Node<'_>, source: &[u8]) -> Option<FieldDescriptor> {
    let mut walker = decl.walk();
    let pointer = decl
        .children(&mut walker)
        .any(|c| !c.is_named() && c.kind() == "*");
    let identifier = embedded_name(ty, source)?;
    let (type_text, kind) = if pointer {
        (format!("*{}", node_text(ty, source)), FieldKind::PointerLike)
    } else {
        (node_text(ty, source).to_string(), classify(ty, source))
    };
    Some(
        FieldDescriptor::new(identifier, type_text, kind)
            .embedded()
            .at_line(line_of(ty)),
    )
}

fn embedded_name<'a>(ty: Node<'a>, source: &'a [u8]) -> Option<&'a str> {
    let name = match ty.kind() {
        "qualified_type" => node_text(ty.child_by_field_name("name")?, source),
        "generic_type" => return embedded_name(ty.child_by_field_name("type")?, source),
        _ => node_text(ty, source),
    };
    (!name.is_empty()).then_some(name)
}

fn classify(ty: Node<'_>, source: &[u8]) -> FieldKind {
    match ty.kind() {
        "pointer_type" | "channel_type" | "function_type" | "interface_type" => FieldKind::PointerLike,
        "slice_type" | "array_type" | "implicit_length_array_type" | "map_type" => FieldKind::Collection,
        "type_identifier" => {
            let name = node_text(ty, source);
            if PRIMITIVES.contains(&name) {
                FieldKind::Primitive
            } else if name == "any" || name == "error" {
                FieldKind::PointerLike
            } else {
                FieldKind::NestedStructure
            }
        }
        "parenthesized_type" => match ty.named_child(0) {
            Some(inner) => classify(inner, source),
            None => FieldKind::NestedStructure,
        },
        _ => FieldKind::NestedStructure,
    }
}

fn other_kind(body: Node<'_>) -> &'static str {
    match body.kind() {
        "interface_type" => "interface",
        "function_type" => "func",
        "map_type" => "map",
        "slice_type" | "array_type" => "slice",
        "pointer_type" => "pointer",
        "channel_type" => "chan",
        _ => "named",
    }
}

/// Tag literal text -> raw tag content.
fn unquote_tag(literal: &str, kind: &str) -> String {
    if kind == "raw_string_literal" {
        return literal.trim_matches('`').to_string();
    }
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
