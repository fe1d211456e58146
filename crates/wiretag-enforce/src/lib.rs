//! Tag enforcement for wiretag.
//!
//! - `compliance`: checks one structure's exported fields against the naming
//!   convention under an exception policy
//! - `coverage`: discovers exported structs in source and finds registry gaps
//! - `audit`: runs both over a whole tree, the CI entry point

pub mod audit;
pub mod compliance;
pub mod coverage;
pub mod error;
pub mod types;

pub use compliance::{check, ComplianceChecker};
pub use error::EnforceError;
