use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tag::{self, TagValue};

/// Broad shape of a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Primitive,
    NestedStructure,
    Collection,
    PointerLike,
}

/// One field of a structure as declared in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub identifier: String,
    /// Raw struct tag without the surrounding quotes, e.g.
    /// `json:"name,omitempty" yaml:"name"`.
    pub tag: Option<String>,
    pub kind: FieldKind,
    /// Declared type as written (`string`, `*Config`, `map[string]bool`).
    pub type_text: String,
    /// Anonymous (embedded) field; the identifier is the embedded type name.
    pub embedded: bool,
    /// 1-based line in the declaring file.
    pub line: Option<u32>,
}

impl FieldDescriptor {
    /// # Panics
    ///
    /// Panics if `identifier` is empty.
    pub fn new(identifier: impl Into<String>, type_text: impl Into<String>, kind: FieldKind) -> Self {
        let identifier = identifier.into();
        assert!(!identifier.is_empty(), "field identifier must not be empty");
        Self {
            identifier,
            tag: None,
            kind,
            type_text: type_text.into(),
            embedded: false,
            line: None,
        }
    }

    pub fn with_tag(mut self, raw: impl Into<String>) -> Self {
        self.tag = Some(raw.into());
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Exported per the Go case rule: the first character is uppercase.
    pub fn is_exported(&self) -> bool {
        is_exported(&self.identifier)
    }

    /// Declared value for one tag key (`json`, `yaml`, ...).
    pub fn declared_tag(&self, key: &str) -> Option<TagValue> {
        self.tag.as_deref().and_then(|raw| tag::lookup_value(raw, key))
    }
}

pub fn is_exported(identifier: &str) -> bool {
    identifier.chars().next().is_some_and(char::is_uppercase)
}

/// Ordered fields of one structure type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDescriptor {
    pub fields: Vec<FieldDescriptor>,
}

impl StructureDescriptor {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn exported_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_exported())
    }
}

/// Shape of a named type: a structure, or anything else (alias, interface,
/// named primitive, function type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeShape {
    Struct(StructureDescriptor),
    Other { kind: String },
}

/// Where a type or field was declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
}

/// A named type and its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// `package.TypeName`
    pub name: String,
    pub location: Option<SourceLocation>,
    pub shape: TypeShape,
}

impl TypeDescriptor {
    pub fn structure(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            location: None,
            shape: TypeShape::Struct(StructureDescriptor::new(fields)),
        }
    }

    pub fn other(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            shape: TypeShape::Other { kind: kind.into() },
        }
    }

    pub fn at(mut self, file: impl Into<PathBuf>, line: u32) -> Self {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    pub fn as_struct(&self) -> Option<&StructureDescriptor> {
        match &self.shape {
            TypeShape::Struct(s) => Some(s),
            TypeShape::Other { .. } => None,
        }
    }
}

/// Reflective access to a value's declared fields and tags.
///
/// Implemented by the Go source extraction in `wiretag-parsers`; Rust code
/// can implement it by hand for any value it wants audited.
pub trait Describe {
    fn describe(&self) -> TypeDescriptor;
}

impl Describe for TypeDescriptor {
    fn describe(&self) -> TypeDescriptor {
        self.clone()
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> TypeDescriptor {
        (**self).describe()
    }
}

/// An exported structure type found by the coverage scanner.
///
/// Equality, hashing and ordering use the qualified name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredType {
    pub qualified_name: String,
    pub file: PathBuf,
    pub line: u32,
}

impl DiscoveredType {
    pub fn new(package: &str, type_name: &str, file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            qualified_name: format!("{package}.{type_name}"),
            file: file.into(),
            line,
        }
    }

    pub fn package(&self) -> &str {
        self.qualified_name
            .split_once('.')
            .map(|(pkg, _)| pkg)
            .unwrap_or_default()
    }

    pub fn type_name(&self) -> &str {
        self.qualified_name
            .split_once('.')
            .map(|(_, name)| name)
            .unwrap_or(&self.qualified_name)
    }
}

impl PartialEq for DiscoveredType {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for DiscoveredType {}

impl Hash for DiscoveredType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

impl PartialOrd for DiscoveredType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DiscoveredType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name.cmp(&other.qualified_name)
    }
}
