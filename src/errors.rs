/*!
 * Error types for the wordsrt library.
 *
 * This module contains custom error types for the different parts of the
 * converter, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by segment construction and re-segmentation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// An argument broke the operation's contract (e.g. zero words per segment)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A segment or word ends before it starts
    #[error("Invalid timing for {record}: end {end} is before start {start}")]
    InvalidTiming {
        /// Human readable description of the offending record
        record: String,
        /// Start time in seconds
        start: f64,
        /// End time in seconds
        end: f64,
    },
}

/// Structural problems found while parsing SRT text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// The text contains no cue blocks at all
    #[error("SRT text contains no subtitle blocks")]
    EmptyDocument,

    /// A block has fewer than the three required lines
    #[error("Block {block} has {lines} line(s), expected at least 3")]
    IncompleteBlock {
        /// 1-based position of the block in the document
        block: usize,
        /// Number of lines found
        lines: usize,
    },

    /// The first line of a block is not a positive integer
    #[error("Block {block} has an invalid index line: {found:?}")]
    InvalidIndex {
        block: usize,
        found: String,
    },

    /// The second line of a block is not a `HH:MM:SS,mmm --> HH:MM:SS,mmm` range
    #[error("Block {block} has a malformed timecode line: {found:?}")]
    MalformedTimecode {
        block: usize,
        found: String,
    },

    /// A single timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors that can occur during file operations
#[derive(Error, Debug)]
pub enum FileError {
    /// The path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing failed for another reason
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its content could not be decoded
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
    },
}

impl FileError {
    /// Classify an I/O error for `path`, keeping "not found" distinct
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Error from segment handling
    #[error("Segment error: {0}")]
    Segment(#[from] SegmentError),

    /// Error from SRT parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(FileError::Io {
            path: PathBuf::new(),
            source: error,
        })
    }
}
