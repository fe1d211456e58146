use std::path::PathBuf;

/// Failure to build or run the tree-sitter Go parser.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("query error: {0}")]
    Query(String),
    #[error("parse failed for {0}")]
    ParseFailed(PathBuf),
}

/// Failure while walking or reading the source tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid ignore pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}
