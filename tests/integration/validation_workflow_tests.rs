/*!
 * Validation of SRT files and folders through the controller
 */

use wordsrt::app_config::Config;
use wordsrt::app_controller::Controller;
use crate::common;

fn controller() -> Controller {
    common::init_test_logging();
    Controller::with_config(Config::default()).unwrap()
}

#[test]
fn test_validate_path_withFolder_shouldCheckEverySrtFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    common::create_test_subtitle(temp_dir.path(), "good.srt").unwrap();
    common::create_test_file(temp_dir.path(), "bad.srt", "1\nno timecode\ntext\n").unwrap();
    common::create_test_file(temp_dir.path(), "ignored.txt", "whatever").unwrap();

    let results = controller().validate_path(temp_dir.path(), false).unwrap();

    assert_eq!(results.len(), 2);
    let bad = results.iter().find(|r| r.path.ends_with("bad.srt")).unwrap();
    let good = results.iter().find(|r| r.path.ends_with("good.srt")).unwrap();
    assert!(!bad.passed());
    assert!(bad.syntax_error.as_deref().unwrap().contains("malformed timecode"));
    assert!(good.passed());
    assert!(good.timecodes.is_none());
}

#[test]
fn test_validate_file_withStrictOverlap_shouldFailTimeline() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "overlap.srt",
        "1\n00:00:00,000 --> 00:00:02,000\nA\n\n2\n00:00:01,500 --> 00:00:03,000\nB\n",
    )
    .unwrap();

    let lenient = controller().validate_file(&path, false).unwrap();
    let strict = controller().validate_file(&path, true).unwrap();

    assert!(lenient.passed());
    assert!(!strict.passed());
    assert_eq!(strict.timecodes.as_ref().unwrap().overlap_count, 1);
}

#[test]
fn test_validate_file_withRenderedOutput_shouldPassStrictChecks() {
    let temp_dir = common::create_temp_dir().unwrap();
    let output = temp_dir.path().join("talk.srt");
    controller()
        .run(&[common::fixture_path("whisperx_document.json")], Some(&output))
        .unwrap();

    let result = controller().validate_file(&output, true).unwrap();

    assert!(result.passed());
    assert!(result.timecodes.unwrap().passed);
}

#[test]
fn test_validate_file_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    assert!(controller().validate_file(&temp_dir.path().join("nope.srt"), false).is_err());
}

#[test]
fn test_validate_path_withEmptyFolder_shouldReturnNoResults() {
    let temp_dir = common::create_temp_dir().unwrap();
    assert!(controller().validate_path(temp_dir.path(), true).unwrap().is_empty());
}
