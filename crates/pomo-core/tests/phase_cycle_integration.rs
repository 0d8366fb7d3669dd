//! Integration tests for the configuration store and phase engine.
//!
//! These tests drive the public API end to end: configuration files on
//! disk, the handoff to the engine, and full runs with a scripted clock.

use std::fs;
use std::time::Duration;

use pomo_core::duration::parse_duration_arg;
use pomo_core::timer::{Reporter, Ticker};
use pomo_core::{
    run, ConfigError, EngineState, Interrupt, IntervalTicker, Phase, PhaseEngine, PhaseKind,
    PhaseOutcome, PhasePlan, TimerConfig, DEFAULT_CONFIG_FILE,
};
use tempfile::TempDir;

/// Ticker that resolves immediately, counting calls.
struct CountingTicker {
    ticks: u64,
    raise_at: Option<u64>,
    interrupt: Interrupt,
}

impl CountingTicker {
    fn new(interrupt: &Interrupt, raise_at: Option<u64>) -> Self {
        Self {
            ticks: 0,
            raise_at,
            interrupt: interrupt.clone(),
        }
    }
}

impl Ticker for CountingTicker {
    async fn tick(&mut self) {
        self.ticks += 1;
        if self.raise_at == Some(self.ticks) {
            // second raise must be a harmless no-op
            self.interrupt.raise();
            self.interrupt.raise();
        }
    }
}

#[derive(Default)]
struct Transcript {
    phases: Vec<PhaseKind>,
    interruptions: u32,
}

impl Reporter for Transcript {
    fn phase_started(&mut self, phase: &Phase, _work_number: u32) {
        self.phases.push(phase.kind);
    }

    fn interrupted(&mut self) {
        self.interruptions += 1;
    }
}

fn seconds_plan(cycle_count: u32) -> PhasePlan {
    PhasePlan {
        work: Duration::from_secs(2),
        short_break: Duration::from_secs(1),
        long_break: Duration::from_secs(1),
        cycle_count,
    }
}

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    let loaded = TimerConfig::load(&path);

    assert!(loaded.warning().is_none());
    assert_eq!(loaded.config, TimerConfig::default());
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"work\": \"25m0s\""));
    assert!(content.contains("\"cycle\": 4"));
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    let config = TimerConfig {
        work: parse_duration_arg("1h30m").unwrap(),
        short_break: Duration::from_millis(90_250),
        long_break: parse_duration_arg("20").unwrap(),
        cycle: 6,
    };
    config.save(&path).unwrap();

    let loaded = TimerConfig::load(&path);
    assert!(loaded.warning().is_none());
    assert_eq!(loaded.config, config);
}

#[test]
fn test_invalid_save_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    TimerConfig::default().save(&path).unwrap();
    let before = fs::read(&path).unwrap();

    let invalid = TimerConfig {
        work: Duration::ZERO,
        ..TimerConfig::default()
    };
    assert!(matches!(invalid.save(&path), Err(ConfigError::Invalid(_))));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_reads_nanosecond_durations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(
        &path,
        r#"{"work": 1500000000000, "short_break": 300000000000, "long_break": 900000000000, "cycle": 4}"#,
    )
    .unwrap();

    let loaded = TimerConfig::load(&path);
    assert!(loaded.warning().is_none());
    assert_eq!(loaded.config, TimerConfig::default());
}

#[tokio::test]
async fn test_fourth_work_leads_to_long_break_and_counter_reset() {
    let interrupt = Interrupt::new();
    let mut engine = PhaseEngine::new(seconds_plan(4));
    let mut ticker = CountingTicker::new(&interrupt, None);
    let mut transcript = Transcript::default();

    let mut kinds = Vec::new();
    for _ in 0..8 {
        let phase = engine.current_phase().unwrap();
        let outcome = engine
            .run_phase(&phase, &mut ticker, &interrupt, &mut transcript)
            .await;
        assert_eq!(outcome, PhaseOutcome::Completed);
        kinds.push(phase.kind);
        engine.advance();
    }

    use PhaseKind::*;
    assert_eq!(
        kinds,
        vec![Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak]
    );
    assert_eq!(engine.state(), EngineState::Running(Work));
    assert_eq!(engine.completed_in_block(), 0);
}

#[tokio::test]
async fn test_double_interrupt_reports_once() {
    let interrupt = Interrupt::new();
    let mut engine = PhaseEngine::new(seconds_plan(2));
    // work(2) + short(1), then raised on the first tick of the second work
    let mut ticker = CountingTicker::new(&interrupt, Some(4));
    let mut transcript = Transcript::default();

    let summary = run(&mut engine, &mut ticker, &interrupt, &mut transcript).await;

    assert_eq!(summary.phases_completed, 2);
    assert_eq!(summary.work_sessions_completed, 1);
    assert_eq!(transcript.interruptions, 1);
    assert_eq!(
        transcript.phases,
        vec![PhaseKind::Work, PhaseKind::ShortBreak, PhaseKind::Work]
    );
    assert_eq!(engine.state(), EngineState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_latency_is_one_tick() {
    let interrupt = Interrupt::new();
    let engine = PhaseEngine::new(PhasePlan {
        work: Duration::from_secs(3),
        ..seconds_plan(4)
    });
    let phase = engine.phase(PhaseKind::Work);
    let start = tokio::time::Instant::now();

    let remote = interrupt.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        remote.raise();
    });

    let mut ticker = IntervalTicker::every_second();
    let mut transcript = Transcript::default();
    let outcome = engine
        .run_phase(&phase, &mut ticker, &interrupt, &mut transcript)
        .await;

    assert_eq!(outcome, PhaseOutcome::Interrupted { remaining_secs: 2 });
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test]
async fn test_zero_tick_phases_yield_to_concurrent_stop() {
    let interrupt = Interrupt::new();
    let mut engine = PhaseEngine::new(PhasePlan {
        work: Duration::from_millis(400),
        short_break: Duration::from_millis(100),
        long_break: Duration::from_millis(900),
        cycle_count: 3,
    });
    let mut ticker = CountingTicker::new(&interrupt, None);
    let mut transcript = Transcript::default();

    let remote = interrupt.clone();
    let stopper = tokio::spawn(async move {
        for _ in 0..12 {
            tokio::task::yield_now().await;
        }
        remote.raise();
    });

    let summary = run(&mut engine, &mut ticker, &interrupt, &mut transcript).await;
    stopper.await.unwrap();

    assert_eq!(ticker.ticks, 0);
    assert_eq!(transcript.interruptions, 1);
    assert_eq!(engine.state(), EngineState::Stopped);
    assert!(summary.phases_completed >= 1);

    use PhaseKind::*;
    let expected = [Work, ShortBreak, Work, ShortBreak, Work, LongBreak];
    for (seen, want) in transcript.phases.iter().zip(expected.iter().cycle()) {
        assert_eq!(seen, want);
    }
}
