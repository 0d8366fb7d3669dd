mod config;

pub use config::{ConfigOrigin, LoadedConfig, TimerConfig, DEFAULT_CONFIG_FILE};
