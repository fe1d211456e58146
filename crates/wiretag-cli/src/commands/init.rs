use std::path::Path;

use wiretag_core::config::{ConfigError, WiretagConfig};

/// Run `wiretag init`: create `.wiretag/wiretag.json` and an empty registry.
pub fn run(root: &Path) -> i32 {
    match WiretagConfig::default().init(root) {
        Ok(dir) => {
            tracing::info!("wiretag init: initialized {}", dir.display());
            0
        }
        Err(ConfigError::AlreadyInitialized(dir)) => {
            tracing::error!("wiretag init: {} already exists", dir.display());
            2
        }
        Err(e) => {
            tracing::error!("wiretag init: {}", e);
            2
        }
    }
}
