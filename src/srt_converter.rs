/*!
 * Segment store and SRT renderers.
 *
 * `SrtConverter` holds an ordered sequence of segments and renders it as SRT in
 * one of three styles:
 * - one cue per word with that word highlighted inside its segment's text
 * - one cue per word showing only the word
 * - one cue per segment with the segment text, optionally re-chunked first
 *
 * Every operation reads the stored segments and returns new values. Nothing
 * here mutates the store, so renderers can be called in any order.
 *
 * Blank lines are dropped from cue bodies, and a cue left with no visible text
 * is skipped. Cue numbers are assigned after skipping, so they stay gapless.
 */

use log::{debug, warn};

use crate::cue::{normalize_body, render_srt, Cue};
use crate::errors::SegmentError;
use crate::segments::{create_segments_from_words, flatten_words, Segment, Word};

/// Ordered, chronological sequence of segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SrtConverter {
    segments: Vec<Segment>,
}

impl SrtConverter {
    /// Create a store over `segments`. Ordering is trusted, not checked.
    pub fn new(segments: Vec<Segment>) -> Self {
        SrtConverter { segments }
    }

    // @creates: Store whose segments and words all have end >= start
    pub fn new_validated(segments: Vec<Segment>) -> Result<Self, SegmentError> {
        for (i, segment) in segments.iter().enumerate() {
            segment.validate(i + 1)?;
        }
        Ok(Self::new(segments))
    }

    /// Stored segments in chronological order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consume the store and return its segments
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Every stored word, flattened in segment order
    pub fn words(&self) -> Vec<Word> {
        flatten_words(&self.segments)
    }

    /// Total number of words across all segments
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// Regroup all stored words into segments of `words_per_segment` words.
    ///
    /// The store itself is left untouched.
    pub fn adjust_word_per_segment(
        &self,
        words_per_segment: usize,
    ) -> Result<Vec<Segment>, SegmentError> {
        let words = self.words();
        let segments = create_segments_from_words(&words, words_per_segment)?;
        debug!(
            "Re-segmented {} segments into {} ({} words per segment)",
            self.segments.len(),
            segments.len(),
            words_per_segment
        );
        Ok(segments)
    }

    /// Re-segmented copy of this store
    pub fn resegmented(&self, words_per_segment: usize) -> Result<Self, SegmentError> {
        Ok(Self::new(self.adjust_word_per_segment(words_per_segment)?))
    }

    /// One cue per word, spanning the word's own interval, showing the whole
    /// segment with that word wrapped in a `<font color>` tag.
    pub fn highlight_word_cues(&self, color: &str) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(self.word_count());

        for (seg_idx, segment) in self.segments.iter().enumerate() {
            let tokens = body_tokens(segment, seg_idx);

            for (word_idx, word) in segment.words.iter().enumerate() {
                let body = tokens
                    .iter()
                    .enumerate()
                    .map(|(i, token)| {
                        if i == word_idx {
                            format!("<font color=\"{}\">{}</font>", color, token)
                        } else {
                            token.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");

                push_cue(&mut cues, word.start, word.end, &body);
            }
        }

        cues
    }

    /// One cue per word showing only that word
    pub fn single_word_cues(&self) -> Vec<Cue> {
        let mut cues = Vec::with_capacity(self.word_count());
        for word in self.segments.iter().flat_map(|segment| segment.words.iter()) {
            push_cue(&mut cues, word.start, word.end, &word.text);
        }
        cues
    }

    /// One cue per segment using the segment text.
    ///
    /// With `words_per_segment` the words are regrouped first and the regrouped
    /// segments are rendered instead of the stored ones.
    pub fn plain_text_cues(
        &self,
        words_per_segment: Option<usize>,
    ) -> Result<Vec<Cue>, SegmentError> {
        let regrouped;
        let segments = match words_per_segment {
            Some(n) => {
                regrouped = self.adjust_word_per_segment(n)?;
                &regrouped
            }
            None => &self.segments,
        };

        let mut cues = Vec::with_capacity(segments.len());
        for segment in segments {
            push_cue(&mut cues, segment.start, segment.end, &segment.text);
        }
        Ok(cues)
    }

    /// SRT text with each word highlighted in turn using `color`
    pub fn to_srt_highlight_word(&self, color: &str) -> String {
        render_srt(&self.highlight_word_cues(color))
    }

    /// SRT text with one word per cue
    pub fn to_srt_single_words(&self) -> String {
        render_srt(&self.single_word_cues())
    }

    /// SRT text with one segment per cue
    pub fn to_srt_plain_text(&self, words_per_segment: Option<usize>) -> Result<String, SegmentError> {
        Ok(render_srt(&self.plain_text_cues(words_per_segment)?))
    }
}

impl From<Vec<Segment>> for SrtConverter {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

/// Append a cue numbered after the existing ones, unless its body is blank
fn push_cue(cues: &mut Vec<Cue>, start: f64, end: f64, body: &str) {
    match normalize_body(body) {
        Some(body) => cues.push(Cue::from_seconds(cues.len() + 1, start, end, body)),
        None => warn!("Skipping cue at {:.3}s with no visible text", start),
    }
}

/// Tokens shown in a highlighted cue body.
///
/// The segment text is used when its whitespace tokens line up one-to-one with
/// the words; otherwise the word texts are used so every word can be marked.
fn body_tokens(segment: &Segment, seg_idx: usize) -> Vec<&str> {
    let text_tokens: Vec<&str> = segment.text.split_whitespace().collect();
    if text_tokens.len() == segment.words.len() {
        return text_tokens;
    }

    if !segment.words.is_empty() {
        warn!(
            "Segment {} text has {} tokens but {} words, highlighting word texts instead",
            seg_idx + 1,
            text_tokens.len(),
            segment.words.len()
        );
    }

    segment.words.iter().map(|w| w.text.trim()).collect()
}
