/*!
 * Stitching of independently transcribed chunks onto one timeline.
 *
 * A long recording is often split into chunks that are transcribed separately,
 * each with timestamps starting near zero. The functions here shift every chunk
 * by the running length of the chunks before it.
 *
 * `initialize_with_normalized_timestamps` takes a chunk's length to be its last
 * segment's end timestamp. That is only an approximation of the real audio
 * length: trailing silence or a missed end of speech makes later chunks drift
 * early. Callers that know the real chunk durations should use
 * `initialize_with_chunk_durations` instead. The approximation is kept as is
 * because existing SRT output depends on it.
 */

use log::{debug, warn};

use crate::errors::SegmentError;
use crate::segments::Segment;
use crate::srt_converter::SrtConverter;

/// Shift each chunk by the sum of the previous chunks' last end timestamps
pub fn normalize_timestamps<I>(segment_arrays: I) -> Vec<Segment>
where
    I: IntoIterator<Item = Vec<Segment>>,
{
    let mut normalized = Vec::new();
    let mut offset = 0.0;

    for (chunk_idx, chunk) in segment_arrays.into_iter().enumerate() {
        // Empty chunks report no end timestamp and leave the offset alone
        let Some(chunk_end) = chunk.last().map(|s| s.end) else {
            warn!("Chunk {} has no segments, skipping", chunk_idx + 1);
            continue;
        };

        debug!(
            "Chunk {}: {} segments shifted by {:.3}s",
            chunk_idx + 1,
            chunk.len(),
            offset
        );

        normalized.extend(chunk.iter().map(|segment| segment.shifted(offset)));
        offset += chunk_end;
    }

    normalized
}

/// Build a store from several chunk transcripts, stitched with
/// [`normalize_timestamps`]
pub fn initialize_with_normalized_timestamps<I>(segment_arrays: I) -> SrtConverter
where
    I: IntoIterator<Item = Vec<Segment>>,
{
    SrtConverter::new(normalize_timestamps(segment_arrays))
}

/// Build a store from several chunk transcripts using the true duration of
/// each chunk in seconds.
///
/// `durations` must hold one non-negative, finite value per chunk.
pub fn initialize_with_chunk_durations(
    segment_arrays: Vec<Vec<Segment>>,
    durations: &[f64],
) -> Result<SrtConverter, SegmentError> {
    if segment_arrays.len() != durations.len() {
        return Err(SegmentError::InvalidArgument(format!(
            "expected one duration per chunk: {} chunks, {} durations",
            segment_arrays.len(),
            durations.len()
        )));
    }

    if let Some(bad) = durations.iter().find(|d| !d.is_finite() || **d < 0.0) {
        return Err(SegmentError::InvalidArgument(format!(
            "chunk durations must be non-negative, got {}",
            bad
        )));
    }

    let mut normalized = Vec::new();
    let mut offset = 0.0;

    for (chunk, duration) in segment_arrays.into_iter().zip(durations) {
        normalized.extend(chunk.iter().map(|segment| segment.shifted(offset)));
        offset += duration;
    }

    Ok(SrtConverter::new(normalized))
}
