/*!
 * Tests for the segment store, re-segmentation and renderers
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wordsrt::cue::Cue;
use wordsrt::segments::{create_segments_from_words, flatten_words};
use wordsrt::validation::parse_srt_string;
use wordsrt::{is_valid_srt_string, Segment, SegmentError, SrtConverter, Word};
use crate::common;

/// Random chronological segments, some of them without words.
///
/// With `allow_blank`, some word and segment texts are empty or hold a blank line.
fn random_segments(rng: &mut StdRng, count: usize, allow_blank: bool) -> Vec<Segment> {
    let mut clock = 0.0_f64;
    let mut segments = Vec::with_capacity(count);

    for s in 0..count {
        let word_count = rng.random_range(0..7);
        let seg_start = clock;
        let mut words = Vec::with_capacity(word_count);

        for w in 0..word_count {
            let start = clock + rng.random_range(0.0..0.2);
            let end = start + rng.random_range(0.05..0.8);
            let text = if allow_blank && rng.random_range(0..6) == 0 {
                String::new()
            } else {
                format!("w{}_{}", s, w)
            };
            words.push(Word::new(text, start, end, rng.random_range(0.0..1.0)));
            clock = end;
        }

        clock += rng.random_range(0.0..1.5);
        let text = words.iter().map(|w| w.text.clone()).collect::<Vec<_>>().join(" ");
        let text = match (allow_blank, rng.random_range(0..6)) {
            (true, 0) => String::new(),
            (true, 1) => format!("first {}\n\nsecond {}", s, s),
            _ if text.trim().is_empty() => format!("segment {}", s),
            _ => text,
        };
        segments.push(Segment::new(seg_start, clock, text, words));
    }

    segments
}

#[test]
fn test_to_srt_single_words_withHelloWorldSegment_shouldProduceExactCues() {
    let converter = SrtConverter::new(vec![Segment::new(
        0.27,
        1.632,
        "Hello world.",
        vec![
            Word::new("Hello", 0.27, 0.61, 0.862),
            Word::new("world.", 0.69, 1.091, 0.779),
        ],
    )]);

    let cues = parse_srt_string(&converter.to_srt_single_words()).unwrap();

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0], Cue::new(1, 270, 610, "Hello".to_string()));
    assert_eq!(cues[1], Cue::new(2, 690, 1091, "world.".to_string()));
}

#[test]
fn test_to_srt_highlight_word_withSampleSegments_shouldEmitOneCuePerWord() {
    let converter = SrtConverter::new(common::sample_segments());
    let srt = converter.to_srt_highlight_word("red");

    let cues = parse_srt_string(&srt).unwrap();
    let words = converter.words();

    assert_eq!(cues.len(), words.len());
    assert!(srt.contains("<font color=\"red\">Hello</font> world."));
    assert!(srt.contains("My name is John <font color=\"red\">Doe.</font>"));

    for (cue, word) in cues.iter().zip(&words) {
        assert_eq!(cue.start_time_ms, (word.start * 1000.0).round() as u64);
        assert_eq!(cue.end_time_ms, (word.end * 1000.0).round() as u64);
        assert_eq!(cue.body.matches("<font").count(), 1);
    }
}

#[test]
fn test_to_srt_highlight_word_withColorValue_shouldPassItThroughVerbatim() {
    let converter = SrtConverter::new(common::sample_segments());
    let srt = converter.to_srt_highlight_word("#FFCC00");
    assert!(srt.contains("<font color=\"#FFCC00\">Nice</font> to meet you."));
}

#[test]
fn test_to_srt_plain_text_withoutWordsPerSegment_shouldRenderStoredSegments() {
    let converter = SrtConverter::new(common::sample_segments());
    let srt = converter.to_srt_plain_text(None).unwrap();

    assert!(srt.starts_with("1\n00:00:00,270 --> 00:00:01,632\n Hello world.\n"));
    assert!(srt.contains("4\n00:00:05,100 --> 00:00:06,803\nApplause\n"));
    assert_eq!(common::cue_indices(&srt), vec![1, 2, 3, 4]);
}

#[test]
fn test_to_srt_plain_text_withWordsPerSegment_shouldRegroupWords() {
    let converter = SrtConverter::new(common::sample_segments());
    let cues = parse_srt_string(&converter.to_srt_plain_text(Some(3)).unwrap()).unwrap();

    // 11 words in groups of 3
    assert_eq!(cues.len(), 4);
    assert_eq!(cues[0].body, "Hello world. Nice");
    assert_eq!(cues[0].start_time_ms, 270);
    assert_eq!(cues[0].end_time_ms, 1913);
    assert_eq!(cues[3].body, "John Doe.");
}

#[test]
fn test_adjust_word_per_segment_withRandomInput_shouldConserveWords() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..50 {
        let count = rng.random_range(0..12);
        let segments = random_segments(&mut rng, count, true);
        let converter = SrtConverter::new(segments.clone());
        let n = rng.random_range(1..8);

        let regrouped = converter.adjust_word_per_segment(n).unwrap();
        let total = flatten_words(&segments).len();

        assert_eq!(regrouped.len(), total.div_ceil(n));
        assert_eq!(flatten_words(&regrouped), flatten_words(&segments));

        for segment in &regrouped {
            assert!(!segment.words.is_empty() && segment.words.len() <= n);
            assert_eq!(segment.start, segment.words[0].start);
            assert_eq!(segment.end, segment.words[segment.words.len() - 1].end);
        }
        assert_eq!(converter.segments(), segments.as_slice());
    }
}

#[test]
fn test_renderers_withRandomInput_shouldNumberCuesAndValidate() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..30 {
        let count = rng.random_range(1..10);
        let converter = SrtConverter::new(random_segments(&mut rng, count, true));
        let visible_words = converter.words().iter().filter(|w| !w.text.trim().is_empty()).count();
        let visible_segments = converter
            .segments()
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .count();

        let outputs = [
            // Highlighted bodies always carry the font tag, so no word is skipped
            (converter.to_srt_highlight_word("yellow"), converter.word_count()),
            (converter.to_srt_single_words(), visible_words),
            (converter.to_srt_plain_text(None).unwrap(), visible_segments),
        ];

        for (srt, expected) in outputs {
            let indices = common::cue_indices(&srt);
            assert_eq!(indices, (1..=expected).collect::<Vec<_>>());
            if expected > 0 {
                assert!(is_valid_srt_string(&srt), "renderer output should validate:\n{}", srt);
            }
        }
    }
}

#[test]
fn test_renderers_withRandomInput_shouldRoundTripTimecodes() {
    let mut rng = StdRng::seed_from_u64(7);
    let converter = SrtConverter::new(random_segments(&mut rng, 20, false));

    let cues = parse_srt_string(&converter.to_srt_single_words()).unwrap();
    for (cue, word) in cues.iter().zip(converter.words()) {
        assert!((cue.start_seconds() - word.start).abs() <= 0.001);
        assert!((cue.end_seconds() - word.end).abs() <= 0.001);
    }
}

#[test]
fn test_create_segments_from_words_withSixWords_shouldPairThem() {
    let words = vec![
        Word::unscored("Hello", 0.0, 0.5),
        Word::unscored("world", 0.6, 1.1),
        Word::unscored("this", 1.2, 1.7),
        Word::unscored("is", 1.8, 2.3),
        Word::unscored("a", 2.4, 2.9),
        Word::unscored("test", 3.0, 3.5),
    ];

    let segments = create_segments_from_words(&words, 2).unwrap();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].end, 1.1);
    assert_eq!(segments[0].text, "Hello world");
    assert_eq!(segments[2].text, "a test");
}

#[test]
fn test_create_segments_from_words_withNoWords_shouldReturnEmpty() {
    assert!(create_segments_from_words(&[], 3).unwrap().is_empty());
}

#[test]
fn test_adjust_word_per_segment_withZero_shouldFailWithInvalidArgument() {
    let converter = SrtConverter::new(common::sample_segments());
    assert!(matches!(
        converter.adjust_word_per_segment(0),
        Err(SegmentError::InvalidArgument(_))
    ));
}

#[test]
fn test_resegmented_shouldReturnNewStore() {
    let converter = SrtConverter::new(common::sample_segments());
    let regrouped = converter.resegmented(5).unwrap();

    assert_eq!(regrouped.segments().len(), 3);
    assert_eq!(regrouped.word_count(), converter.word_count());
    assert_eq!(converter.segments().len(), 4);
}
