//! JSON-based timer configuration.
//!
//! Stores the four values the phase engine runs from:
//! - Work, short break and long break lengths
//! - Work sessions per block before a long break
//!
//! Configuration is stored at `pomodoro_config.json` in the working directory.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ValidationError};
use crate::timer::PhasePlan;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pomodoro_config.json";

/// Timer configuration.
///
/// Serialized to/from JSON. Missing fields take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work", with = "crate::duration::text")]
    pub work: Duration,
    #[serde(default = "default_short_break", with = "crate::duration::text")]
    pub short_break: Duration,
    #[serde(default = "default_long_break", with = "crate::duration::text")]
    pub long_break: Duration,
    #[serde(default = "default_cycle")]
    pub cycle: u32,
}

// Default functions
fn default_work() -> Duration {
    Duration::from_secs(25 * 60)
}
fn default_short_break() -> Duration {
    Duration::from_secs(5 * 60)
}
fn default_long_break() -> Duration {
    Duration::from_secs(15 * 60)
}
fn default_cycle() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work: default_work(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            cycle: default_cycle(),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    File,
    /// No file existed; defaults were written to the path.
    Created,
    /// Defaults held in memory only. The file, if any, was left untouched.
    Fallback(ConfigError),
}

/// Result of [`TimerConfig::load`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: TimerConfig,
    pub origin: ConfigOrigin,
}

impl LoadedConfig {
    /// The reason defaults are in use, if the file could not be used.
    pub fn warning(&self) -> Option<&ConfigError> {
        match &self.origin {
            ConfigOrigin::Fallback(err) => Some(err),
            _ => None,
        }
    }
}

impl TimerConfig {
    /// Load from `path`, creating it with defaults when absent.
    ///
    /// Never fails: an unreadable, malformed or invalid file yields the
    /// defaults in memory together with the reason in [`ConfigOrigin::Fallback`].
    pub fn load(path: impl AsRef<Path>) -> LoadedConfig {
        let path = path.as_ref();
        let loaded = |config: TimerConfig, origin: ConfigOrigin| LoadedConfig { config, origin };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = Self::default();
                return match config.save(path) {
                    Ok(()) => {
                        info!(path = %path.display(), "created default configuration");
                        loaded(config, ConfigOrigin::Created)
                    }
                    Err(err) => {
                        warn!(error = %err, "could not write default configuration");
                        loaded(config, ConfigOrigin::Fallback(err))
                    }
                };
            }
            Err(source) => {
                let err = ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(error = %err, "using default configuration");
                return loaded(Self::default(), ConfigOrigin::Fallback(err));
            }
        };

        let err = match serde_json::from_str::<TimerConfig>(&content) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    debug!(path = %path.display(), "loaded configuration");
                    return loaded(config, ConfigOrigin::File);
                }
                Err(invalid) => ConfigError::Invalid(invalid),
            },
            Err(source) => ConfigError::ParseFailed {
                path: path.to_path_buf(),
                source,
            },
        };
        warn!(error = %err, "using default configuration");
        loaded(Self::default(), ConfigOrigin::Fallback(err))
    }

    /// Validate and persist to `path`.
    ///
    /// Nothing is written when validation fails. The file is replaced by
    /// renaming a fully written sibling, so an interrupted save leaves the
    /// previous contents intact.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for values breaking the invariant and
    /// [`ConfigError::SaveFailed`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.validate()?;

        let save_failed = |source: std::io::Error| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            source,
        };

        let content = self.to_json().map_err(|e| save_failed(e.into()))?;
        let tmp_path = temp_path_for(path);
        if let Err(e) = fs::write(&tmp_path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(save_failed(e));
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(save_failed(e));
        }
        debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Check that every duration is at least one second and the cycle count
    /// is at least 1.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("work", self.work),
            ("short_break", self.short_break),
            ("long_break", self.long_break),
        ] {
            if value.as_secs() == 0 {
                return Err(ValidationError::invalid(
                    field,
                    "durations must be at least one second",
                ));
            }
        }
        if self.cycle < 1 {
            return Err(ValidationError::invalid("cycle", "the cycle count must be at least 1"));
        }
        Ok(())
    }

    /// Serialize as JSON indented by one space per level.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(serde::ser::Error::custom)
    }

    // ── Updates (return the previous value) ─────────────────────────

    pub fn set_work(&mut self, value: Duration) -> Duration {
        std::mem::replace(&mut self.work, value)
    }

    pub fn set_short_break(&mut self, value: Duration) -> Duration {
        std::mem::replace(&mut self.short_break, value)
    }

    pub fn set_long_break(&mut self, value: Duration) -> Duration {
        std::mem::replace(&mut self.long_break, value)
    }

    pub fn set_cycle(&mut self, value: u32) -> u32 {
        std::mem::replace(&mut self.cycle, value)
    }
}

impl From<&TimerConfig> for PhasePlan {
    fn from(config: &TimerConfig) -> Self {
        PhasePlan {
            work: config.work,
            short_break: config.short_break,
            long_break: config.long_break,
            cycle_count: config.cycle,
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
