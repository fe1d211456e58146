use std::path::Path;

use wiretag_core::config::{WiretagConfig, WIRETAG_DIR};
use wiretag_enforce::types::{TagMapping, TagResult};
use wiretag_output::OutputFormatter;

use super::emit;

/// Run `wiretag tag <IDENT>...`. Uses the project's acronyms and rewrites
/// when `.wiretag/` exists, the defaults otherwise.
pub fn run(formatter: &dyn OutputFormatter, root: &Path, identifiers: Vec<String>) -> i32 {
    let rules = WiretagConfig::load(&root.join(WIRETAG_DIR)).naming_rules();
    let tags = identifiers
        .into_iter()
        .map(|identifier| TagMapping {
            expected: rules.expected_tag(&identifier),
            identifier,
        })
        .collect();
    emit(&formatter.format_tag(&TagResult::new(tags)));
    0
}
