use wiretag_core::registry::RegistryError;
use wiretag_parsers::{ParseError, ScanError};

#[derive(Debug, thiserror::Error)]
pub enum EnforceError {
    #[error("{type_name} is not a struct (declared as {kind})")]
    NotAStruct { type_name: String, kind: String },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
