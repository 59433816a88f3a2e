/*!
 * # wordsrt - word-timed transcripts to SubRip subtitles
 *
 * A Rust library for turning speech-recognition output (segments with
 * word-level timestamps and confidence scores) into SRT subtitles.
 *
 * ## Features
 *
 * - Render SRT in three styles:
 *   - one cue per word, highlighted inside its segment
 *   - one cue per word on its own
 *   - one cue per segment, optionally regrouped to a fixed word count
 * - Regroup words into segments of N words
 * - Validate SRT text and files
 * - Stitch separately transcribed chunks onto one timeline
 * - Repair words with missing timings
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segments`: Word and segment model, word grouping
 * - `cue`: SRT cue and timecode formatting
 * - `srt_converter`: Segment store and renderers
 * - `normalizer`: Multi-chunk timestamp normalization
 * - `validation`: SRT structure and timeline checks
 * - `file_utils`: File system operations and transcript loading
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod cue;
pub mod errors;
pub mod file_utils;
pub mod normalizer;
pub mod segments;
pub mod srt_converter;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use cue::Cue;
pub use errors::{AppError, FileError, SegmentError, SubtitleError};
pub use file_utils::FileManager;
pub use normalizer::{initialize_with_chunk_durations, initialize_with_normalized_timestamps};
pub use segments::{create_segments_from_words, Segment, Word};
pub use srt_converter::SrtConverter;
pub use validation::{is_valid_srt_file, is_valid_srt_string};

/// Write SRT (or any text) to `path`, replacing existing content
pub fn write_to_file<P: AsRef<std::path::Path>>(path: P, content: &str) -> Result<(), FileError> {
    FileManager::write_to_file(path, content)
}
