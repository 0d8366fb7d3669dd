//! # pomo Core Library
//!
//! This library provides the core logic for the pomo Pomodoro timer: an
//! endless work / short break / long break sequence, counted down one second
//! at a time until the process is asked to stop. The `pomo` binary is a thin
//! command layer over the same library.
//!
//! ## Architecture
//!
//! - **Phase Engine**: explicit state machine plus a countdown driver that
//!   takes its tick source and cancellation source from the caller
//! - **Storage**: JSON configuration file with defaults and validation
//! - **Duration codec**: `25m0s`-style text for the file, `25m` / `25` for
//!   command arguments
//!
//! ## Key Components
//!
//! - [`PhaseEngine`]: Phase sequencing and countdown
//! - [`run`]: Run-until-cancelled driver
//! - [`TimerConfig`]: Configuration persistence
//! - [`Interrupt`]: One-shot stop request shared with the signal listener

pub mod duration;
pub mod error;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, InvalidFormatError, ValidationError};
pub use storage::{ConfigOrigin, LoadedConfig, TimerConfig, DEFAULT_CONFIG_FILE};
pub use timer::{
    run, ConsoleReporter, EngineState, Interrupt, IntervalTicker, Phase, PhaseEngine, PhaseKind,
    PhaseOutcome, PhasePlan, RunSummary,
};
