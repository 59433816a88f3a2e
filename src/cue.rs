use std::fmt;

use crate::errors::SubtitleError;

// @module: SRT cue representation and timecodes

// @struct: Single indexed, timestamped subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: 1-based sequence number
    pub index: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Body text, possibly spanning several lines
    pub body: String,
}

impl Cue {
    /// Creates a new cue from millisecond timings
    pub fn new(index: usize, start_time_ms: u64, end_time_ms: u64, body: String) -> Self {
        Cue {
            index,
            start_time_ms,
            end_time_ms,
            body,
        }
    }

    /// Creates a cue from float second timings as found in transcripts
    pub fn from_seconds(index: usize, start: f64, end: f64, body: impl Into<String>) -> Self {
        Cue {
            index,
            start_time_ms: seconds_to_ms(start),
            end_time_ms: seconds_to_ms(end),
            body: body.into(),
        }
    }

    /// Start time in seconds
    pub fn start_seconds(&self) -> f64 {
        self.start_time_ms as f64 / 1000.0
    }

    /// End time in seconds
    pub fn end_seconds(&self) -> f64 {
        self.end_time_ms as f64 / 1000.0
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let (clock, millis) = timestamp.trim().split_once(',').ok_or_else(invalid)?;
        let parts: Vec<&str> = clock.split(':').collect();
        if parts.len() != 3 || millis.len() != 3 {
            return Err(invalid());
        }

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !parts.iter().all(|p| all_digits(p)) || !all_digits(millis) {
            return Err(invalid());
        }

        let hours: u64 = parts[0].parse().map_err(|_| invalid())?;
        let minutes: u64 = parts[1].parse().map_err(|_| invalid())?;
        let seconds: u64 = parts[2].parse().map_err(|_| invalid())?;
        let millis: u64 = millis.parse().map_err(|_| invalid())?;

        // Validate time components
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        // Hours are unbounded in width, so the total may not fit in u64
        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .ok_or_else(invalid)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.body)?;
        writeln!(f)
    }
}

/// Convert float seconds to whole milliseconds, rounding to the nearest ms.
///
/// Negative and non-finite inputs clamp to zero.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

/// Cue body with blank lines removed, or `None` when nothing visible is left.
///
/// A blank line ends an SRT block, so it can never appear inside a body.
pub fn normalize_body(body: &str) -> Option<String> {
    let lines: Vec<&str> = body.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Format float seconds directly as an SRT timestamp
pub fn format_seconds(seconds: f64) -> String {
    Cue::format_timestamp(seconds_to_ms(seconds))
}

/// Assemble cues into an SRT document, each followed by a blank line
pub fn render_srt(cues: &[Cue]) -> String {
    cues.iter().map(|cue| cue.to_string()).collect()
}
