mod engine;
mod interrupt;
mod phase;
mod reporter;
mod signal;
mod ticker;

pub use engine::{run, PhaseEngine, PhaseOutcome, PhasePlan, RunSummary};
pub use interrupt::{CancellationSource, Interrupt};
pub use phase::{transition, EngineState, Phase, PhaseKind};
pub use reporter::{ConsoleReporter, Reporter};
pub use signal::spawn_interrupt_listener;
pub use ticker::{IntervalTicker, Ticker};
