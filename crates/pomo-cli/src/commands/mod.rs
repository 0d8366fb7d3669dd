use std::path::Path;

use pomo_core::TimerConfig;

pub mod config;
pub mod timer;

/// Load the configuration, telling the user when defaults stand in for it.
pub fn load_config(path: &Path) -> TimerConfig {
    let loaded = TimerConfig::load(path);
    if let Some(warning) = loaded.warning() {
        println!("⚠️  {warning}; using default configuration");
    }
    loaded.config
}
