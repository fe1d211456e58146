use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wiretag", version, about = "Audit Go struct tags against field names")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug detail to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Root of the audited tree (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Create .wiretag/ with a default config and an empty registry
    Init,

    /// Print the expected tag for field identifiers
    Tag {
        /// Field identifiers, e.g. FingerprintMD5
        #[arg(required = true, value_parser = NonEmptyStringValueParser::new())]
        identifiers: Vec<String>,
    },

    /// Check registered types for tag violations
    Check {
        /// Qualified type names to check (default: every registry entry)
        types: Vec<String>,
    },

    /// Find exported structs with no registry entry
    Coverage,

    /// Check plus coverage; exits non-zero on any finding
    Audit,
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
