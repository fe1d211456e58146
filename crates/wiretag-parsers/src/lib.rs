//! Go source discovery and extraction for wiretag.

pub mod error;
pub mod go;
pub mod heuristic;
pub mod treesitter;
pub mod walker;

pub use error::{ParseError, ScanError};
pub use go::{GoFile, GoStructParser};
pub use walker::{SourceWalker, WalkOptions};
