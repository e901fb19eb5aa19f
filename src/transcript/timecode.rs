//! Millisecond timecodes and their `mm:ss` display labels.

use crate::error::{LrcsyncError, Result};
use serde::{Deserialize, Serialize};

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// A non-negative playback position in milliseconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeCode(u64);

impl TimeCode {
    pub const ZERO: TimeCode = TimeCode(0);

    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Build a timecode from the captures of an LRC marker.
    ///
    /// `seconds` may carry a fraction of any length; the total is rounded
    /// to the nearest millisecond.
    pub fn from_lrc_parts(hours: Option<&str>, minutes: &str, seconds: &str) -> Result<Self> {
        let hours: u64 = match hours {
            Some(h) => parse_component(h, "hours")?,
            None => 0,
        };
        let minutes: u64 = parse_component(minutes, "minutes")?;
        let seconds: f64 = seconds
            .parse()
            .map_err(|_| LrcsyncError::MalformedTimecode(format!("invalid seconds: {}", seconds)))?;

        let total_seconds = (hours as f64) * 3600.0 + (minutes as f64) * 60.0 + seconds;
        let ms = (total_seconds * 1000.0).round();
        if !ms.is_finite() || ms < 0.0 || ms >= u64::MAX as f64 {
            return Err(LrcsyncError::MalformedTimecode(format!(
                "out of range: {}:{}:{}",
                hours, minutes, seconds
            )));
        }

        Ok(Self(ms as u64))
    }

    /// Build a timecode from the four fields of an SRT `hh:mm:ss,mmm` stamp.
    pub fn from_srt_parts(hours: &str, minutes: &str, seconds: &str, millis: &str) -> Result<Self> {
        let hours: u64 = parse_component(hours, "hours")?;
        let minutes: u64 = parse_component(minutes, "minutes")?;
        let seconds: u64 = parse_component(seconds, "seconds")?;
        let millis: u64 = parse_component(millis, "milliseconds")?;

        [(hours, MS_PER_HOUR), (minutes, MS_PER_MINUTE), (seconds, MS_PER_SECOND), (millis, 1)]
            .into_iter()
            .try_fold(0u64, |acc, (value, unit)| {
                value.checked_mul(unit).and_then(|ms| acc.checked_add(ms))
            })
            .map(Self)
            .ok_or_else(|| {
                LrcsyncError::MalformedTimecode(format!(
                    "out of range: {}:{}:{},{}",
                    hours, minutes, seconds, millis
                ))
            })
    }

    /// Parse a full SRT stamp such as `00:01:02,500`.
    pub fn parse_srt(stamp: &str) -> Result<Self> {
        let stamp = stamp.trim();
        let (clock, millis) = stamp
            .split_once(',')
            .ok_or_else(|| LrcsyncError::MalformedTimecode(format!("missing ',': {}", stamp)))?;

        let parts: Vec<&str> = clock.split(':').collect();
        if parts.len() != 3 {
            return Err(LrcsyncError::MalformedTimecode(format!(
                "SRT timestamp must be hh:mm:ss,mmm: {}",
                stamp
            )));
        }

        Self::from_srt_parts(parts[0], parts[1], parts[2], millis)
    }

    /// Normalized `mm:ss` label. Hours fold into minutes and the
    /// sub-second part is dropped.
    pub fn label(self) -> String {
        let minutes = self.0 / MS_PER_MINUTE;
        let seconds = (self.0 / MS_PER_SECOND) % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Parse a `mm:ss` label back into milliseconds.
    pub fn parse_label(label: &str) -> Result<Self> {
        let (minutes, seconds) = label
            .trim()
            .split_once(':')
            .ok_or_else(|| LrcsyncError::MalformedTimecode(format!("not a label: {}", label)))?;
        let minutes: u64 = parse_component(minutes, "minutes")?;
        let seconds: u64 = parse_component(seconds, "seconds")?;

        minutes
            .checked_mul(MS_PER_MINUTE)
            .zip(seconds.checked_mul(MS_PER_SECOND))
            .and_then(|(m, s)| m.checked_add(s))
            .map(Self)
            .ok_or_else(|| LrcsyncError::MalformedTimecode(format!("out of range: {}", label)))
    }
}

/// Accepts plain milliseconds (`2500`), `mm:ss[.fff]` or `hh:mm:ss[.fff]`.
impl std::str::FromStr for TimeCode {
    type Err = LrcsyncError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if !s.contains(':') {
            return parse_component(s, "milliseconds").map(Self);
        }

        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => Self::from_lrc_parts(None, minutes, seconds),
            [hours, minutes, seconds] => Self::from_lrc_parts(Some(*hours), minutes, seconds),
            _ => Err(LrcsyncError::MalformedTimecode(format!("expected mm:ss or hh:mm:ss: {}", s))),
        }
    }
}

impl std::fmt::Display for TimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:03}", self.label(), self.0 % MS_PER_SECOND)
    }
}

fn parse_component(value: &str, what: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| LrcsyncError::MalformedTimecode(format!("invalid {}: {}", what, value)))
}
