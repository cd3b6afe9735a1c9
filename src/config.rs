use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u64 = 1;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct FinitoConfig {
    /// Command used to open attachment URLs.
    pub browser_command: String,
    pub debug_logging: bool,
}

impl Default for FinitoConfig {
    fn default() -> Self {
        Self {
            browser_command: "xdg-open".to_string(),
            debug_logging: false,
        }
    }
}
