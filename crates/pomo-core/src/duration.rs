//! Duration text codec.
//!
//! Durations are written in the compact `1h30m0s` form and read back with
//! `humantime`, which accepts the same unit letters. Anything below a second
//! is appended as `ms`/`us`/`ns` components so every rendered value parses
//! back to the exact same `Duration`.

use std::fmt::Write as _;
use std::time::Duration;

use crate::error::InvalidFormatError;

const DURATION_HINT: &str = "use '25m' or '25' (minutes), at least one second";
const CYCLE_HINT: &str = "the number of cycles must be an integer greater than 0";

/// Parse a user-supplied duration argument.
///
/// Accepts a duration expression (`25m`, `1h30m`, `90s`) or a bare positive
/// integer, which is taken as whole minutes. Anything shorter than one
/// second is rejected, since phases count down in whole seconds.
pub fn parse_duration_arg(input: &str) -> Result<Duration, InvalidFormatError> {
    let trimmed = input.trim();
    let invalid = || InvalidFormatError {
        input: input.to_string(),
        expected: DURATION_HINT,
    };

    if let Ok(duration) = humantime::parse_duration(trimmed) {
        return if duration.as_secs() == 0 {
            Err(invalid())
        } else {
            Ok(duration)
        };
    }

    match trimmed.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Duration::from_secs(60)
            .checked_mul(u32::try_from(minutes).map_err(|_| invalid())?)
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Parse a user-supplied cycle count (a positive integer).
pub fn parse_cycle_arg(input: &str) -> Result<u32, InvalidFormatError> {
    match input.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(InvalidFormatError {
            input: input.to_string(),
            expected: CYCLE_HINT,
        }),
    }
}

/// Render a duration as `25m0s`, `1h30m0s`, `45s`, `1m0s500ms` or `0s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let nanos = duration.subsec_nanos();
    if secs == 0 && nanos == 0 {
        return "0s".to_string();
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h{minutes}m{seconds}s");
    } else if minutes > 0 {
        let _ = write!(out, "{minutes}m{seconds}s");
    } else if seconds > 0 {
        let _ = write!(out, "{seconds}s");
    }

    let millis = nanos / 1_000_000;
    let micros = (nanos / 1_000) % 1_000;
    let rest = nanos % 1_000;
    for (value, unit) in [(millis, "ms"), (micros, "us"), (rest, "ns")] {
        if value > 0 {
            let _ = write!(out, "{value}{unit}");
        }
    }
    out
}

/// Render whole seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(remaining_secs: u64) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

/// Serde adapter storing a `Duration` as duration text.
///
/// Integer values are also accepted on input and read as nanoseconds.
pub mod text {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Nanos(u64),
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_duration(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => humantime::parse_duration(text.trim())
                .map_err(|e| serde::de::Error::custom(format!("invalid duration '{text}': {e}"))),
            Repr::Nanos(nanos) => Ok(Duration::from_nanos(nanos)),
        }
    }
}
