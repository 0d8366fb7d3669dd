//! Human-readable progress output for a run.

use std::io::Write;

use super::phase::{Phase, PhaseKind};
use crate::duration::{format_clock, format_duration};

/// Receives engine notifications. Every method defaults to doing nothing.
pub trait Reporter {
    /// A phase is about to count down. `work_number` is the 1-based position
    /// of the current work session within its block.
    fn phase_started(&mut self, _phase: &Phase, _work_number: u32) {}

    fn tick(&mut self, _phase: &Phase, _remaining_secs: u64) {}

    fn phase_completed(&mut self, _phase: &Phase) {}

    fn interrupted(&mut self) {}

    /// A long break finished and a new block begins.
    fn block_completed(&mut self, _blocks_completed: u64) {}
}

/// Writes announcements and a live `MM:SS` countdown to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    countdown_open: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn close_countdown(&mut self) {
        if self.countdown_open {
            println!();
            self.countdown_open = false;
        }
    }
}

fn completion_notice(kind: PhaseKind) -> &'static str {
    if kind.is_break() {
        "🔔 Break over!"
    } else {
        "🔔 Time's up!"
    }
}

impl Reporter for ConsoleReporter {
    fn phase_started(&mut self, phase: &Phase, work_number: u32) {
        self.close_countdown();
        let length = format_duration(phase.duration);
        match phase.kind {
            PhaseKind::Work => println!("🍅 Pomodoro {work_number}: working {length}..."),
            PhaseKind::ShortBreak => println!("☕ Short break {length}..."),
            PhaseKind::LongBreak => println!("😴 Long break {length}..."),
        }
    }

    fn tick(&mut self, _phase: &Phase, remaining_secs: u64) {
        print!("\r⏱️  Time remaining: {}", format_clock(remaining_secs));
        let _ = std::io::stdout().flush();
        self.countdown_open = true;
    }

    fn phase_completed(&mut self, phase: &Phase) {
        self.close_countdown();
        println!("{}", completion_notice(phase.kind));
    }

    fn interrupted(&mut self) {
        self.close_countdown();
        println!("⏹️  Timer interrupted");
    }

    fn block_completed(&mut self, _blocks_completed: u64) {
        println!("🎉 Cycle complete! Starting a new cycle...");
    }
}
