use std::path::Path;

use wiretag_output::OutputFormatter;

use super::{emit, load_auditor};

/// Run `wiretag check [TYPE...]`.
pub fn run(formatter: &dyn OutputFormatter, root: &Path, types: Vec<String>) -> i32 {
    let auditor = match load_auditor(root, "check") {
        Ok(a) => a,
        Err(code) => return code,
    };
    match auditor.check(&types) {
        Ok(result) => {
            emit(&formatter.format_check(&result));
            if result.is_clean() {
                0
            } else {
                1
            }
        }
        Err(e) => {
            tracing::error!("wiretag check: {}", e);
            2
        }
    }
}
