/*!
 * Timeline checks for parsed SRT cues.
 *
 * Structural validity says nothing about timing. This module checks that:
 * - every cue ends no earlier than it starts
 * - consecutive cues do not overlap
 * - cue numbers run 1, 2, 3, ... without gaps
 */

use log::debug;

use crate::cue::Cue;

/// Result of timecode validation for a single cue
#[derive(Debug, Clone)]
pub struct TimecodeEntryResult {
    /// Sequence number of the cue
    pub index: usize,
    /// Whether the cue passed validation
    pub passed: bool,
    /// Issues found
    pub issues: Vec<TimecodeIssue>,
}

impl TimecodeEntryResult {
    /// Create a passing result
    pub fn passed(index: usize) -> Self {
        Self {
            index,
            passed: true,
            issues: vec![],
        }
    }

    /// Create a failing result
    pub fn failed(index: usize, issues: Vec<TimecodeIssue>) -> Self {
        Self {
            index,
            passed: false,
            issues,
        }
    }
}

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// End time is before start time
    InvalidTimeRange {
        start_ms: u64,
        end_ms: u64,
    },
    /// Overlaps with the previous cue
    OverlapsWithEntry {
        other_index: usize,
        overlap_ms: u64,
    },
    /// Cue number does not follow its predecessor
    UnexpectedIndex {
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { start_ms, end_ms } => {
                write!(f, "Invalid time range: start {}ms > end {}ms", start_ms, end_ms)
            }
            TimecodeIssue::OverlapsWithEntry { other_index, overlap_ms } => {
                write!(f, "Overlaps with cue {} by {}ms", other_index, overlap_ms)
            }
            TimecodeIssue::UnexpectedIndex { expected, found } => {
                write!(f, "Expected cue number {}, found {}", expected, found)
            }
        }
    }
}

/// Result of validating all timecodes in a document
#[derive(Debug, Clone)]
pub struct TimecodeValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Results for each cue
    pub entry_results: Vec<TimecodeEntryResult>,
    /// Total number of issues
    pub total_issues: usize,
    /// Number of overlapping cues
    pub overlap_count: usize,
}

impl TimecodeValidationResult {
    /// Get all failed cues
    pub fn failed_entries(&self) -> Vec<&TimecodeEntryResult> {
        self.entry_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Configuration for timecode validation
#[derive(Debug, Clone)]
pub struct TimecodeValidatorConfig {
    /// Whether to check for overlaps
    pub check_overlaps: bool,
    /// Whether cue numbers must be consecutive from 1
    pub check_numbering: bool,
}

impl Default for TimecodeValidatorConfig {
    fn default() -> Self {
        Self {
            check_overlaps: true,
            check_numbering: true,
        }
    }
}

/// Timecode validator for parsed cues
#[derive(Debug, Default)]
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate cues in document order
    pub fn validate_cues(&self, cues: &[Cue]) -> TimecodeValidationResult {
        let mut overlap_count = 0;
        let mut entry_results = Vec::with_capacity(cues.len());

        for (pos, cue) in cues.iter().enumerate() {
            let mut issues = Vec::new();

            if cue.end_time_ms < cue.start_time_ms {
                issues.push(TimecodeIssue::InvalidTimeRange {
                    start_ms: cue.start_time_ms,
                    end_ms: cue.end_time_ms,
                });
            }

            if self.config.check_numbering && cue.index != pos + 1 {
                issues.push(TimecodeIssue::UnexpectedIndex {
                    expected: pos + 1,
                    found: cue.index,
                });
            }

            if self.config.check_overlaps && pos > 0 {
                let prev = &cues[pos - 1];
                if prev.end_time_ms > cue.start_time_ms {
                    overlap_count += 1;
                    issues.push(TimecodeIssue::OverlapsWithEntry {
                        other_index: prev.index,
                        overlap_ms: prev.end_time_ms - cue.start_time_ms,
                    });
                }
            }

            entry_results.push(if issues.is_empty() {
                TimecodeEntryResult::passed(cue.index)
            } else {
                TimecodeEntryResult::failed(cue.index, issues)
            });
        }

        let total_issues: usize = entry_results.iter().map(|r| r.issues.len()).sum();
        let passed = entry_results.iter().all(|r| r.passed);

        debug!(
            "Timecode validation: {} cues, {} issues, {} overlaps",
            cues.len(),
            total_issues,
            overlap_count
        );

        TimecodeValidationResult {
            passed,
            entry_results,
            total_issues,
            overlap_count,
        }
    }
}
