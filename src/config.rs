use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u64 = 1;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct CertameConfig {
    /// Base URL of the procurement backend, no trailing slash required.
    pub api_url: String,
    pub browser_command: String,
    pub debug_logging: bool,
}

impl Default for CertameConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            browser_command: "xdg-open".to_string(),
            debug_logging: false,
        }
    }
}
