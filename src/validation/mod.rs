/*!
 * Validation of SRT documents.
 *
 * # Architecture
 *
 * - `srt_syntax`: Structural parsing (index line, timecode line, body)
 * - `timecodes`: Timeline checks on parsed cues (ranges, overlaps, numbering)
 */

pub mod srt_syntax;
pub mod timecodes;

// Re-export main types
pub use srt_syntax::{is_valid_srt_file, is_valid_srt_string, parse_srt_string};
pub use timecodes::{TimecodeIssue, TimecodeValidator, TimecodeValidatorConfig};
