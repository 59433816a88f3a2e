/*!
 * Tests for file system helpers and transcript loading
 */

use std::fs;

use wordsrt::file_utils::{FileManager, TranscriptFile};
use wordsrt::FileError;
use crate::common;

#[test]
fn test_write_to_file_withExistingFile_shouldOverwrite() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("talk.srt");

    FileManager::write_to_file(&path, "first").unwrap();
    FileManager::write_to_file(&path, "second").unwrap();

    assert!(FileManager::file_exists(&path));
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
}

#[test]
fn test_write_to_file_withMissingParentDir_shouldFailWithoutCreatingIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let parent = temp_dir.path().join("out");
    let path = parent.join("talk.srt");

    let result = FileManager::write_to_file(&path, "content");

    assert!(result.is_err());
    assert!(!FileManager::dir_exists(&parent));

    FileManager::ensure_dir(&parent).unwrap();
    FileManager::write_to_file(&path, "content").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "content");
}

#[test]
fn test_find_files_withMixedExtensions_shouldReturnSortedMatches() {
    let temp_dir = common::create_temp_dir().unwrap();
    let sub = temp_dir.path().join("nested");
    FileManager::ensure_dir(&sub).unwrap();

    common::create_test_file(temp_dir.path(), "b.srt", "").unwrap();
    common::create_test_file(temp_dir.path(), "a.SRT", "").unwrap();
    common::create_test_file(temp_dir.path(), "notes.txt", "").unwrap();
    common::create_test_file(&sub, "c.srt", "").unwrap();

    let files = FileManager::find_files(temp_dir.path(), ".srt").unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["a.SRT", "b.srt", "c.srt"]);
}

#[test]
fn test_dir_exists_withFilePath_shouldBeFalse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(temp_dir.path(), "x.txt", "x").unwrap();

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
}

#[test]
fn test_read_to_string_withMissingFile_shouldReturnNotFound() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = FileManager::read_to_string(temp_dir.path().join("nope.json"));
    assert!(matches!(result, Err(FileError::NotFound(_))));
}

#[test]
fn test_load_transcript_withDocumentShape_shouldReadSegments() {
    let transcript = FileManager::load_transcript(common::fixture_path("whisperx_document.json")).unwrap();

    assert!(matches!(transcript, TranscriptFile::Document { .. }));
    let segments = transcript.into_segments(5).unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, " Hello world.");
    assert_eq!(segments[1].words.len(), 4);
    assert_eq!(segments[1].words[3].score, Some(0.849));
}

#[test]
fn test_load_transcript_withSegmentArray_shouldReadSegments() {
    let transcript = FileManager::load_transcript(common::fixture_path("chunk_b.json")).unwrap();

    assert!(matches!(transcript, TranscriptFile::Segments(_)));
    let segments = transcript.into_segments(5).unwrap();
    assert_eq!(segments.len(), 2);
    assert!(segments[1].words.is_empty());
}

#[test]
fn test_load_transcript_withFlatWords_shouldGroupAndRepairTimes() {
    let transcript = FileManager::load_transcript(common::fixture_path("flat_words.json")).unwrap();

    assert!(matches!(transcript, TranscriptFile::Words(_)));
    let segments = transcript.into_segments(2).unwrap();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[1].text, "this is");
    // "is" has no timings: previous end and next start fill the gap
    assert_eq!(segments[1].words[1].start, 1.7);
    assert_eq!(segments[1].words[1].end, 2.4);
    assert_eq!(segments[1].end, 2.4);
}

#[test]
fn test_load_transcript_withTextKeyedWords_shouldReadWordList() {
    let transcript = FileManager::load_transcript(common::fixture_path("text_words.json")).unwrap();

    assert!(matches!(transcript, TranscriptFile::Words(_)));
    let segments = transcript.into_segments(5).unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "Good morning everyone.");
    assert_eq!(segments[0].words.len(), 3);
    assert_eq!(segments[0].end, 1.8);
}

#[test]
fn test_transcript_file_fromValue_withUnsupportedShape_shouldFail() {
    assert!(TranscriptFile::from_value(serde_json::json!("just text")).is_err());
    assert!(TranscriptFile::from_value(serde_json::json!({"language": "en"})).is_err());
}

#[test]
fn test_load_transcript_withInvalidJson_shouldReturnParseError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{\"segments\": [").unwrap();

    let result = FileManager::load_transcript(&path);
    assert!(matches!(result, Err(FileError::Parse { .. })));
}
