use std::path::Path;

use tree_sitter::{Language, Node, Parser, Query, Tree};

use crate::error::ParseError;

/// Top-level package clause and named type declarations.
pub const GO_STRUCT_QUERY: &str = r#"
(package_clause (package_identifier) @package)

(type_spec
  name: (type_identifier) @type.name
  type: (_) @type.body) @type.spec

(type_alias
  name: (type_identifier) @alias.name
  type: (_) @alias.body) @alias.spec
"#;

pub fn go_language() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

pub fn go_parser() -> Result<Parser, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&go_language())
        .map_err(|e| ParseError::Language(format!("{e}")))?;
    Ok(parser)
}

pub fn go_struct_query() -> Result<Query, ParseError> {
    Query::new(&go_language(), GO_STRUCT_QUERY)
        .map_err(|e| ParseError::Query(format!("query compilation error for go: {e}")))
}

pub fn parse(parser: &mut Parser, path: &Path, source: &str) -> Result<Tree, ParseError> {
    parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| ParseError::ParseFailed(path.to_path_buf()))
}

pub fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based start line.
pub fn line_of(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}
