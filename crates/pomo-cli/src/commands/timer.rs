use std::path::Path;

use pomo_core::duration::format_duration;
use pomo_core::timer::spawn_interrupt_listener;
use pomo_core::{ConsoleReporter, Interrupt, IntervalTicker, PhaseEngine, PhasePlan};

use super::load_config;

/// Run the timer in the foreground until Ctrl+C or SIGTERM.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path);

    println!("🚀 Starting Pomodoro timer...");
    println!(
        "⏱️  Settings: work {} | short break {} | long break {} | cycles {}",
        format_duration(config.work),
        format_duration(config.short_break),
        format_duration(config.long_break),
        config.cycle
    );
    println!("💡 Press Ctrl+C to stop");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let summary = runtime.block_on(async {
        let interrupt = Interrupt::new();
        let listener = spawn_interrupt_listener(interrupt.clone())?;

        let mut engine = PhaseEngine::new(PhasePlan::from(&config));
        let mut ticker = IntervalTicker::every_second();
        let mut reporter = ConsoleReporter::new();
        let summary = pomo_core::run(&mut engine, &mut ticker, &interrupt, &mut reporter).await;

        listener.abort();
        Ok::<_, std::io::Error>(summary)
    })?;

    tracing::debug!(?summary, "run finished");
    println!("👋 Timer {summary}");
    Ok(())
}
