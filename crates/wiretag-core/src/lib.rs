//! Core types for wiretag.
//!
//! - `naming`: field identifier -> expected wire tag
//! - `tag`: Go struct tag parsing
//! - `types`: structure descriptors and the `Describe` capability
//! - `policy`: per-type exception policies
//! - `registry`: the audit registry
//! - `config`: `.wiretag/wiretag.json`

pub mod config;
pub mod naming;
pub mod policy;
pub mod registry;
pub mod tag;
pub mod types;
