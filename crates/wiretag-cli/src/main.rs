//! wiretag CLI: audits Go struct tags against field names.
//!
//! Commands: `init`, `tag`, `check`, `coverage`, `audit`. See
//! `wiretag --help` for usage. Exit codes: 0 clean, 1 findings, 2 errors.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn wiretag_output::OutputFormatter> = if cli.json {
        Box::new(wiretag_output::json::JsonFormatter)
    } else {
        Box::new(wiretag_output::human::HumanFormatter)
    };

    let root: PathBuf = match cli.root {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("wiretag: failed to get current directory: {}", e);
                std::process::exit(2);
            }
        },
    };

    let exit_code = match cli.command {
        Commands::Init => commands::init::run(&root),
        Commands::Tag { identifiers } => commands::tag::run(&*formatter, &root, identifiers),
        Commands::Check { types } => commands::check::run(&*formatter, &root, types),
        Commands::Coverage => commands::coverage::run(&*formatter, &root),
        Commands::Audit => commands::audit::run(&*formatter, &root),
    };

    std::process::exit(exit_code);
}

/// `WIRETAG_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("WIRETAG_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
