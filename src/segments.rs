use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::SegmentError;

// @module: Word and segment timing model

// @struct: Timestamped token with a confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    // @field: Token text (WhisperX calls it "word")
    #[serde(rename = "word", alias = "text")]
    pub text: String,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Alignment confidence in [0, 1], advisory only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Word {
    /// Create a word with a confidence score
    pub fn new(text: impl Into<String>, start: f64, end: f64, score: f64) -> Self {
        Word {
            text: text.into(),
            start,
            end,
            score: Some(score),
        }
    }

    /// Create a word without a confidence score
    pub fn unscored(text: impl Into<String>, start: f64, end: f64) -> Self {
        Word {
            text: text.into(),
            start,
            end,
            score: None,
        }
    }

    /// Copy of this word moved along the timeline by `offset` seconds
    pub fn shifted(&self, offset: f64) -> Self {
        Word {
            start: self.start + offset,
            end: self.end + offset,
            ..self.clone()
        }
    }
}

/// Word record as produced upstream, where the aligner may have dropped timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWord {
    #[serde(rename = "word", alias = "text")]
    pub text: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl From<Word> for RawWord {
    fn from(word: Word) -> Self {
        RawWord {
            text: word.text,
            start: Some(word.start),
            end: Some(word.end),
            score: word.score,
        }
    }
}

/// Fill in missing word timings from neighbouring words.
///
/// A missing start borrows the previous word's end, then the next word's start,
/// then falls back to zero. A missing end borrows the next word's start, then the
/// previous word's end, then the word's own start.
pub fn fill_missing_times(raw_words: &[RawWord]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::with_capacity(raw_words.len());
    let mut repaired = 0;

    for (i, raw) in raw_words.iter().enumerate() {
        let prev_end = words.last().map(|w| w.end);
        let next_start = raw_words.get(i + 1).and_then(|w| w.start);

        if raw.start.is_none() || raw.end.is_none() {
            repaired += 1;
        }

        let start = raw.start.or(prev_end).or(next_start).unwrap_or(0.0);
        let end = raw.end.or(next_start).or(prev_end).unwrap_or(start);

        words.push(Word {
            text: raw.text.clone(),
            start,
            end,
            score: raw.score,
        });
    }

    if repaired > 0 {
        debug!("Filled missing timings for {} of {} words", repaired, raw_words.len());
    }

    words
}

// @struct: Chronological span of transcript text plus its words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSegment")]
pub struct Segment {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Transcript text, trusted by the plain-text renderer
    pub text: String,

    // @field: Word timings, trusted by the word renderers (may be empty)
    pub words: Vec<Word>,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: f64, end: f64, text: impl Into<String>, words: Vec<Word>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
            words,
        }
    }

    /// Build a segment spanning a group of words.
    ///
    /// Returns `None` for an empty group since there is no time span to take.
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        let start = words.first()?.start;
        let end = words.last()?.end;
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Some(Segment {
            start,
            end,
            text,
            words,
        })
    }

    /// Copy of this segment, and all of its words, moved by `offset` seconds
    pub fn shifted(&self, offset: f64) -> Self {
        Segment {
            start: self.start + offset,
            end: self.end + offset,
            text: self.text.clone(),
            words: self.words.iter().map(|w| w.shifted(offset)).collect(),
        }
    }

    /// Check that the segment and its words do not run backwards in time
    pub fn validate(&self, position: usize) -> Result<(), SegmentError> {
        if self.end < self.start {
            return Err(SegmentError::InvalidTiming {
                record: format!("segment {}", position),
                start: self.start,
                end: self.end,
            });
        }

        for (idx, word) in self.words.iter().enumerate() {
            if word.end < word.start {
                return Err(SegmentError::InvalidTiming {
                    record: format!("word {} ({:?}) of segment {}", idx + 1, word.text, position),
                    start: word.start,
                    end: word.end,
                });
            }
        }

        Ok(())
    }
}

/// Segment record as produced upstream: `words` may be missing or null and
/// individual words may lack timings.
#[derive(Debug, Clone, Deserialize)]
struct RawSegment {
    start: f64,
    end: f64,
    text: String,
    #[serde(default)]
    words: Option<Vec<RawWord>>,
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        let words = raw
            .words
            .map(|words| fill_missing_times(&words))
            .unwrap_or_default();

        Segment {
            start: raw.start,
            end: raw.end,
            text: raw.text,
            words,
        }
    }
}

/// Concatenate the words of every segment, in order
pub fn flatten_words(segments: &[Segment]) -> Vec<Word> {
    segments
        .iter()
        .flat_map(|segment| segment.words.iter().cloned())
        .collect()
}

/// Group a flat word sequence into segments of `words_per_segment` words.
///
/// The final segment holds the remainder when the word count is not a multiple
/// of `words_per_segment`.
pub fn create_segments_from_words(
    words: &[Word],
    words_per_segment: usize,
) -> Result<Vec<Segment>, SegmentError> {
    if words_per_segment < 1 {
        return Err(SegmentError::InvalidArgument(format!(
            "words_per_segment must be at least 1, got {}",
            words_per_segment
        )));
    }

    let segments: Vec<Segment> = words
        .chunks(words_per_segment)
        .filter_map(|chunk| Segment::from_words(chunk.to_vec()))
        .collect();

    debug!(
        "Grouped {} words into {} segments of up to {} words",
        words.len(),
        segments.len(),
        words_per_segment
    );

    Ok(segments)
}

/// Same grouping as [`create_segments_from_words`] for words that may lack timings
pub fn create_segments_from_raw_words(
    words: &[RawWord],
    words_per_segment: usize,
) -> Result<Vec<Segment>, SegmentError> {
    create_segments_from_words(&fill_missing_times(words), words_per_segment)
}
