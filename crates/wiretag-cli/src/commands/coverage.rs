use std::path::Path;

use wiretag_output::OutputFormatter;

use super::{emit, load_auditor};

/// Run `wiretag coverage`.
pub fn run(formatter: &dyn OutputFormatter, root: &Path) -> i32 {
    let auditor = match load_auditor(root, "coverage") {
        Ok(a) => a,
        Err(code) => return code,
    };
    match auditor.coverage() {
        Ok(result) => {
            emit(&formatter.format_coverage(&result));
            if result.is_clean() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            tracing::error!("wiretag coverage: {}", e);
            2
        }
    }
}
