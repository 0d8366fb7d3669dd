use std::fmt;
use std::time::Duration;

/// Which segment of a cycle is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl PhaseKind {
    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Work => "Work",
            PhaseKind::ShortBreak => "Short break",
            PhaseKind::LongBreak => "Long break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, PhaseKind::Work)
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A phase about to run, with its configured length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub kind: PhaseKind,
    pub duration: Duration,
}

impl Phase {
    /// Whole seconds to count down. Sub-second remainders are dropped.
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }
}

/// Engine state. `Stopped` is terminal and only reached by interruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running(PhaseKind),
    Stopped,
}

/// Next state after the current phase completes.
///
/// `completed_in_block` counts work sessions finished in the current block
/// before this one and stays below `cycle_count`. A short break hands back
/// the incremented counter, a long break hands back zero.
pub fn transition(
    state: EngineState,
    completed_in_block: u32,
    cycle_count: u32,
) -> (EngineState, u32) {
    match state {
        EngineState::Running(PhaseKind::Work) => {
            if completed_in_block + 1 < cycle_count {
                (EngineState::Running(PhaseKind::ShortBreak), completed_in_block)
            } else {
                (EngineState::Running(PhaseKind::LongBreak), completed_in_block)
            }
        }
        EngineState::Running(PhaseKind::ShortBreak) => {
            (EngineState::Running(PhaseKind::Work), completed_in_block + 1)
        }
        EngineState::Running(PhaseKind::LongBreak) => (EngineState::Running(PhaseKind::Work), 0),
        EngineState::Stopped => (EngineState::Stopped, completed_in_block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WORK: EngineState = EngineState::Running(PhaseKind::Work);
    const SHORT: EngineState = EngineState::Running(PhaseKind::ShortBreak);
    const LONG: EngineState = EngineState::Running(PhaseKind::LongBreak);

    #[test]
    fn work_goes_to_short_break_mid_block() {
        assert_eq!(transition(WORK, 0, 4), (SHORT, 0));
        assert_eq!(transition(WORK, 2, 4), (SHORT, 2));
    }

    #[test]
    fn last_work_of_block_goes_to_long_break() {
        assert_eq!(transition(WORK, 3, 4), (LONG, 3));
    }

    #[test]
    fn breaks_return_to_work() {
        assert_eq!(transition(SHORT, 1, 4), (WORK, 2));
        assert_eq!(transition(LONG, 3, 4), (WORK, 0));
    }

    #[test]
    fn single_cycle_block_always_takes_long_break() {
        assert_eq!(transition(WORK, 0, 1), (LONG, 0));
        assert_eq!(transition(LONG, 0, 1), (WORK, 0));
    }

    #[test]
    fn stopped_is_terminal() {
        assert_eq!(transition(EngineState::Stopped, 2, 4), (EngineState::Stopped, 2));
    }

    #[test]
    fn labels() {
        assert_eq!(PhaseKind::ShortBreak.to_string(), "Short break");
        assert!(PhaseKind::LongBreak.is_break());
        assert!(!PhaseKind::Work.is_break());
    }

    proptest! {
        #[test]
        fn counter_stays_below_cycle_count(cycle in 1u32..12, steps in 0usize..200) {
            let mut state = WORK;
            let mut counter = 0;
            let mut long_breaks = 0;
            for _ in 0..steps {
                let (next, next_counter) = transition(state, counter, cycle);
                if next == LONG {
                    long_breaks += 1;
                }
                state = next;
                counter = next_counter;
                prop_assert!(counter < cycle);
            }
            // one long break per `cycle` work sessions, two phases per session
            prop_assert!(long_breaks <= steps / (2 * cycle as usize) + 1);
        }
    }
}
