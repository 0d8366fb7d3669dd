//! Phase engine implementation.
//!
//! The engine sequences work and break phases forever and counts each one
//! down a tick at a time. It owns no clock and no signal handling: the
//! caller supplies a [`Ticker`] and a [`CancellationSource`], which keeps
//! the countdown deterministic under test.
//!
//! ## State Transitions
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//!   any -> Stopped (interruption only)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PhaseEngine::new(plan);
//! let summary = run(&mut engine, &mut IntervalTicker::every_second(), &interrupt, &mut reporter).await;
//! ```

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use super::interrupt::CancellationSource;
use super::phase::{transition, EngineState, Phase, PhaseKind};
use super::reporter::Reporter;
use super::ticker::Ticker;

/// The four values an engine is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePlan {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    /// Work sessions per block, i.e. between two long breaks.
    pub cycle_count: u32,
}

/// How a single countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    Completed,
    /// Stopped early with `remaining_secs` still on the clock.
    Interrupted { remaining_secs: u64 },
}

/// Totals for a run that has reached `Stopped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub phases_completed: u64,
    pub work_sessions_completed: u64,
    pub blocks_completed: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stopped after {} phases ({} pomodoros, {} full cycles)",
            self.phases_completed, self.work_sessions_completed, self.blocks_completed
        )
    }
}

/// Core phase engine.
///
/// Holds an immutable plan plus the position within the current block.
#[derive(Debug, Clone)]
pub struct PhaseEngine {
    plan: PhasePlan,
    state: EngineState,
    completed_in_block: u32,
}

impl PhaseEngine {
    /// Create an engine positioned at the first work phase.
    ///
    /// A `cycle_count` of zero is treated as one.
    pub fn new(plan: PhasePlan) -> Self {
        let plan = PhasePlan {
            cycle_count: plan.cycle_count.max(1),
            ..plan
        };
        Self {
            plan,
            state: EngineState::Running(PhaseKind::Work),
            completed_in_block: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn plan(&self) -> &PhasePlan {
        &self.plan
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn completed_in_block(&self) -> u32 {
        self.completed_in_block
    }

    pub fn phase(&self, kind: PhaseKind) -> Phase {
        let duration = match kind {
            PhaseKind::Work => self.plan.work,
            PhaseKind::ShortBreak => self.plan.short_break,
            PhaseKind::LongBreak => self.plan.long_break,
        };
        Phase { kind, duration }
    }

    /// The phase to run next, or `None` once stopped.
    pub fn current_phase(&self) -> Option<Phase> {
        match self.state {
            EngineState::Running(kind) => Some(self.phase(kind)),
            EngineState::Stopped => None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Move past the current phase after it completed.
    pub fn advance(&mut self) -> EngineState {
        let (next, counter) = transition(self.state, self.completed_in_block, self.plan.cycle_count);
        debug!(from = ?self.state, to = ?next, completed_in_block = counter, "phase transition");
        self.state = next;
        self.completed_in_block = counter;
        next
    }

    pub fn stop(&mut self) {
        self.state = EngineState::Stopped;
    }

    /// Count `phase` down one tick at a time.
    ///
    /// The cancellation source is checked after every tick, before the
    /// remaining time is decremented, so an interruption is noticed within
    /// one tick regardless of how long the phase is.
    pub async fn run_phase<T, C, R>(
        &self,
        phase: &Phase,
        ticker: &mut T,
        cancel: &C,
        reporter: &mut R,
    ) -> PhaseOutcome
    where
        T: Ticker,
        C: CancellationSource + ?Sized,
        R: Reporter + ?Sized,
    {
        let mut remaining = phase.duration_secs();

        if remaining == 0 {
            // no tick to await; still give the listener task a turn
            tokio::task::yield_now().await;
        }

        while remaining > 0 {
            ticker.tick().await;
            if cancel.is_cancelled() {
                debug!(phase = %phase.kind, remaining, "countdown interrupted");
                reporter.interrupted();
                return PhaseOutcome::Interrupted {
                    remaining_secs: remaining,
                };
            }
            remaining -= 1;
            reporter.tick(phase, remaining);
        }

        reporter.phase_completed(phase);
        PhaseOutcome::Completed
    }
}

/// Drive `engine` until it is cancelled.
///
/// There is no natural end: blocks repeat until the cancellation source
/// reports a stop, either between phases or during a countdown.
pub async fn run<T, C, R>(
    engine: &mut PhaseEngine,
    ticker: &mut T,
    cancel: &C,
    reporter: &mut R,
) -> RunSummary
where
    T: Ticker,
    C: CancellationSource + ?Sized,
    R: Reporter + ?Sized,
{
    let mut summary = RunSummary::default();

    loop {
        if cancel.is_cancelled() {
            engine.stop();
            reporter.interrupted();
            break;
        }
        let Some(phase) = engine.current_phase() else {
            break;
        };

        debug!(phase = %phase.kind, secs = phase.duration_secs(), "phase started");
        reporter.phase_started(&phase, engine.completed_in_block() + 1);

        if let PhaseOutcome::Interrupted { .. } =
            engine.run_phase(&phase, ticker, cancel, reporter).await
        {
            engine.stop();
            break;
        }

        summary.phases_completed += 1;
        match phase.kind {
            PhaseKind::Work => summary.work_sessions_completed += 1,
            PhaseKind::LongBreak => {
                summary.blocks_completed += 1;
                reporter.block_completed(summary.blocks_completed);
            }
            PhaseKind::ShortBreak => {}
        }
        engine.advance();
    }

    info!(
        cycle_count = engine.plan().cycle_count,
        phases = summary.phases_completed,
        pomodoros = summary.work_sessions_completed,
        "timer stopped"
    );
    summary
}
