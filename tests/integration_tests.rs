//! Integration tests for the ingestion adapters

use ats_scorer::input::entities::{EntityRecognizer, NoEntities, PrecomputedEntities};
use ats_scorer::input::keywords::{extract_job_keywords, load_keyword_file};
use ats_scorer::input::manager::InputManager;
use ats_scorer::input::source::{FileResumeSource, JsonDocumentSource, ResumeSource};
use ats_scorer::processing::document::EntityLabel;
use ats_scorer::processing::keyword_extractor::KeywordExtractor;
use ats_scorer::{score_resume, AtsScorerError};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_json_document_is_not_extracted_as_text() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/resume_document.json");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AtsScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AtsScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(AtsScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_file_source_with_detection_and_entities() {
    let recognizer = PrecomputedEntities::from_file(Path::new("tests/fixtures/entities.json"))
        .await
        .unwrap();
    assert_eq!(recognizer.recognize("").unwrap().len(), 7);

    let mut source = FileResumeSource::new("tests/fixtures/sample_resume.txt", Box::new(recognizer))
        .with_section_detection(true);
    let document = source.load().await.unwrap();

    assert!(document.has_section("experience"));
    assert!(document.has_section("education"));
    assert!(document.has_section("skills"));
    assert!(document.has_section("summary"));
    assert_eq!(document.extracted_entities.len(), 7);
    assert_eq!(
        document.entities_labeled(EntityLabel::Organization).count(),
        3
    );
}

#[tokio::test]
async fn test_file_source_without_detection_keeps_explicit_sections_only() {
    let mut source = FileResumeSource::new("tests/fixtures/sample_resume.txt", Box::new(NoEntities))
        .with_sections(vec!["Skills".to_string()]);
    let document = source.load().await.unwrap();

    assert_eq!(document.parsed_sections, vec!["Skills".to_string()]);
    assert!(document.extracted_entities.is_empty());
    assert_eq!(source.describe(), "tests/fixtures/sample_resume.txt");
}

#[tokio::test]
async fn test_malformed_entities_fail_before_scoring() {
    let result = PrecomputedEntities::from_file(Path::new("tests/fixtures/bad_entities.json")).await;
    assert!(matches!(result, Err(AtsScorerError::Validation(_))));
}

#[tokio::test]
async fn test_json_document_source() {
    let mut source = JsonDocumentSource::new("tests/fixtures/resume_document.json");
    let document = source.load().await.unwrap();

    assert_eq!(document.text, "python sql aws");
    assert!(document.extracted_entities.is_empty());

    let keywords = load_keyword_file(Path::new("tests/fixtures/keywords.txt")).await.unwrap();
    let result = score_resume(&document, &keywords);
    assert_eq!(result.ats_score, 90.0);
    assert_eq!(result.missing_keywords, vec!["Docker".to_string()]);
}

#[tokio::test]
async fn test_json_document_source_rejects_missing_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, r#"{"parsed_sections": ["skills"]}"#).unwrap();

    let result = JsonDocumentSource::new(&path).load().await;
    assert!(matches!(result, Err(AtsScorerError::Validation(_))));
}

#[tokio::test]
async fn test_keywords_from_job_description() {
    let manager = InputManager::new();
    let extractor = KeywordExtractor::new(25, 3).unwrap();

    let keywords = extract_job_keywords(
        &manager,
        Path::new("tests/fixtures/job_description.md"),
        &extractor,
    )
    .await
    .unwrap();

    let list = keywords.as_slice();
    assert!(list.contains(&"python".to_string()));
    assert!(list.contains(&"postgresql".to_string()));
    assert!(list.contains(&"kubernetes".to_string()));
    assert!(!list.contains(&"experience".to_string()));
}

#[tokio::test]
async fn test_empty_keyword_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.txt");
    std::fs::write(&path, "\n , \n").unwrap();

    let result = load_keyword_file(&path).await;
    assert!(matches!(result, Err(AtsScorerError::InvalidInput(_))));
}
