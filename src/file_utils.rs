use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use walkdir::WalkDir;

use crate::errors::{FileError, SegmentError};
use crate::segments::{create_segments_from_raw_words, RawWord, Segment};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|e| FileError::from_io(path, e))?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, recursively
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>, FileError> {
        let dir = dir.as_ref();
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                match e.into_io_error() {
                    Some(io) => FileError::from_io(path, io),
                    None => FileError::Parse {
                        path,
                        message: "filesystem loop detected".to_string(),
                    },
                }
            })?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, FileError> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| FileError::from_io(path, e))
    }

    /// Write a string to a file, replacing any previous content.
    ///
    /// The parent directory must already exist.
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FileError> {
        let path = path.as_ref();
        fs::write(path, content).map_err(|e| FileError::from_io(path, e))?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// Load a JSON transcript file
    pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<TranscriptFile, FileError> {
        let path = path.as_ref();
        let content = Self::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Accepted shapes of a transcript JSON file.
///
/// A segment and a word keyed by `text` look alike, so an array is read as a
/// word list when any element has a `word` key or no element has `words`.
#[derive(Debug, Clone)]
pub enum TranscriptFile {
    /// Aligner output object with a `segments` array
    Document { segments: Vec<Segment> },
    /// Bare array of segments
    Segments(Vec<Segment>),
    /// Flat array of words, grouped on load
    Words(Vec<RawWord>),
}

impl TranscriptFile {
    /// Decide the transcript shape of a parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut map) => {
                let segments = map
                    .remove("segments")
                    .ok_or_else(|| <serde_json::Error as de::Error>::missing_field("segments"))?;
                Ok(TranscriptFile::Document {
                    segments: serde_json::from_value(segments)?,
                })
            }
            Value::Array(items) => {
                if is_word_list(&items) {
                    Ok(TranscriptFile::Words(serde_json::from_value(Value::Array(items))?))
                } else {
                    Ok(TranscriptFile::Segments(serde_json::from_value(Value::Array(items))?))
                }
            }
            other => Err(<serde_json::Error as de::Error>::custom(format!(
                "expected a transcript object or array, found {}",
                other
            ))),
        }
    }

    /// Segments of the transcript; flat word lists are grouped `words_per_segment` at a time
    pub fn into_segments(self, words_per_segment: usize) -> Result<Vec<Segment>, SegmentError> {
        match self {
            TranscriptFile::Document { segments } | TranscriptFile::Segments(segments) => {
                Ok(segments)
            }
            TranscriptFile::Words(words) => {
                create_segments_from_raw_words(&words, words_per_segment)
            }
        }
    }
}

impl<'de> Deserialize<'de> for TranscriptFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}

fn is_word_list(items: &[Value]) -> bool {
    let any_has = |key: &str| items.iter().any(|item| item.get(key).is_some());
    any_has("word") || !any_has("words")
}
