/*!
 * Structural parsing and validation of SRT text.
 *
 * A document is a sequence of blocks separated by one or more blank lines.
 * Each block needs:
 * - a positive integer index line
 * - a `HH:MM:SS,mmm --> HH:MM:SS,mmm` timecode line
 * - at least one body line
 */

use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cue::Cue;
use crate::errors::{FileError, SubtitleError};
use crate::file_utils::FileManager;

// @const: SRT timecode range line, hours may be wider than two digits
static TIMECODE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}:\d{2}:\d{2},\d{3})\s+-->\s+(\d{2,}:\d{2}:\d{2},\d{3})\s*$").unwrap()
});

/// Parse SRT text into cues, failing on the first malformed block
pub fn parse_srt_string(content: &str) -> Result<Vec<Cue>, SubtitleError> {
    let blocks = split_blocks(content);
    if blocks.is_empty() {
        return Err(SubtitleError::EmptyDocument);
    }

    let cues = blocks
        .iter()
        .enumerate()
        .map(|(i, lines)| parse_block(i + 1, lines))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} SRT cues", cues.len());
    Ok(cues)
}

/// Whether `content` is well-formed SRT with at least one block
pub fn is_valid_srt_string(content: &str) -> bool {
    match parse_srt_string(content) {
        Ok(_) => true,
        Err(e) => {
            debug!("SRT validation failed: {}", e);
            false
        }
    }
}

/// Whether the file at `path` holds well-formed SRT.
///
/// Unreadable paths are an error, distinct from malformed content.
pub fn is_valid_srt_file<P: AsRef<Path>>(path: P) -> Result<bool, FileError> {
    let content = FileManager::read_to_string(&path)?;
    let valid = is_valid_srt_string(&content);
    if !valid {
        warn!("Malformed SRT file: {}", path.as_ref().display());
    }
    Ok(valid)
}

/// Group non-blank lines into blocks; runs of blank lines separate blocks
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(block: usize, lines: &[&str]) -> Result<Cue, SubtitleError> {
    if lines.len() < 3 {
        return Err(SubtitleError::IncompleteBlock {
            block,
            lines: lines.len(),
        });
    }

    let index_line = lines[0].trim();
    let index = match index_line.parse::<usize>() {
        Ok(n) if n > 0 && index_line.bytes().all(|b| b.is_ascii_digit()) => n,
        _ => {
            return Err(SubtitleError::InvalidIndex {
                block,
                found: index_line.to_string(),
            });
        }
    };

    let timecode_line = lines[1].trim();
    let caps = TIMECODE_LINE_REGEX
        .captures(timecode_line)
        .ok_or_else(|| SubtitleError::MalformedTimecode {
            block,
            found: timecode_line.to_string(),
        })?;

    let start_ms = Cue::parse_timestamp(&caps[1])?;
    let end_ms = Cue::parse_timestamp(&caps[2])?;

    Ok(Cue::new(index, start_ms, end_ms, lines[2..].join("\n")))
}
