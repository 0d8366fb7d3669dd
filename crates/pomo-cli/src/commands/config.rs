use std::path::Path;

use clap::Subcommand;
use pomo_core::duration::{format_duration, parse_cycle_arg, parse_duration_arg};
use pomo_core::{ConfigError, InvalidFormatError, TimerConfig};

use super::load_config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Status,
    /// Set the work duration (e.g. 25m, 1h30m, or 25 for minutes)
    Work {
        /// Duration or whole minutes
        value: String,
    },
    /// Set the short break duration
    Short {
        /// Duration or whole minutes
        value: String,
    },
    /// Set the long break duration
    Long {
        /// Duration or whole minutes
        value: String,
    },
    /// Set how many pomodoros come before a long break
    Cycle {
        /// Positive integer
        value: String,
    },
}

pub fn run(action: ConfigAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(path);

    if let ConfigAction::Status = action {
        print_status(&config);
        return Ok(());
    }

    let change = match apply(&mut config, &action) {
        Ok(change) => change,
        Err(e) => {
            println!("Error: {e}");
            return Ok(());
        }
    };
    println!("{change}");

    match config.save(path) {
        Ok(()) => println!("✅ Configuration saved"),
        Err(ConfigError::Invalid(e)) => println!("❌ Could not save configuration: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Apply an update to `config`, returning the `old → new` line to print.
fn apply(config: &mut TimerConfig, action: &ConfigAction) -> Result<String, InvalidFormatError> {
    let line = match action {
        ConfigAction::Status => String::new(),
        ConfigAction::Work { value } => {
            let new = parse_duration_arg(value)?;
            let old = config.set_work(new);
            format!("⏱️  Work time updated: {} → {}", format_duration(old), format_duration(new))
        }
        ConfigAction::Short { value } => {
            let new = parse_duration_arg(value)?;
            let old = config.set_short_break(new);
            format!("☕ Short break updated: {} → {}", format_duration(old), format_duration(new))
        }
        ConfigAction::Long { value } => {
            let new = parse_duration_arg(value)?;
            let old = config.set_long_break(new);
            format!("😴 Long break updated: {} → {}", format_duration(old), format_duration(new))
        }
        ConfigAction::Cycle { value } => {
            let new = parse_cycle_arg(value)?;
            let old = config.set_cycle(new);
            format!("🔄 Cycles updated: {old} → {new}")
        }
    };
    Ok(line)
}

fn print_status(config: &TimerConfig) {
    println!("📊 Current configuration:");
    println!("   🍅 Work: {}", format_duration(config.work));
    println!("   ☕ Short break: {}", format_duration(config.short_break));
    println!("   😴 Long break: {}", format_duration(config.long_break));
    println!("   🔄 Cycles: {}", config.cycle);
}
