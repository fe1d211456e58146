pub mod audit;
pub mod check;
pub mod coverage;
pub mod init;
pub mod tag;

use std::path::Path;

use wiretag_core::config::WIRETAG_DIR;
use wiretag_enforce::audit::Auditor;

/// Load `.wiretag/` under `root`, or log why not and return exit code 2.
pub(crate) fn load_auditor(root: &Path, command: &str) -> Result<Auditor, i32> {
    let wiretag_dir = root.join(WIRETAG_DIR);
    if !wiretag_dir.is_dir() {
        tracing::error!("wiretag {}: not initialized. Run `wiretag init` first.", command);
        return Err(2);
    }
    Auditor::load(root, &wiretag_dir).map_err(|e| {
        tracing::error!("wiretag {}: {}", command, e);
        2
    })
}

/// Formatter output goes to stdout; clean human output is empty.
pub(crate) fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
