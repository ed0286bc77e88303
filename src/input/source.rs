//! Ingestion adapters producing a `ResumeDocument` for the scorer

use crate::error::{AtsScorerError, Result};
use crate::input::entities::EntityRecognizer;
use crate::input::manager::InputManager;
use crate::processing::document::{ResumeDocument, SectionDetector};
use log::{debug, info};
use std::path::PathBuf;
use tokio::fs;

/// Anything that can hand the scorer a validated resume document
pub trait ResumeSource {
    fn load(&mut self) -> impl std::future::Future<Output = Result<ResumeDocument>> + Send;
    fn describe(&self) -> String;
}

/// Resume file plus optional section labels and entity annotations
pub struct FileResumeSource {
    path: PathBuf,
    sections: Vec<String>,
    recognizer: Box<dyn EntityRecognizer>,
    detect_sections: bool,
}

/// A `ResumeDocument` serialized as JSON by an upstream pipeline
pub struct JsonDocumentSource {
    path: PathBuf,
}

impl FileResumeSource {
    pub fn new(path: impl Into<PathBuf>, recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self {
            path: path.into(),
            sections: Vec::new(),
            recognizer,
            detect_sections: false,
        }
    }

    pub fn with_sections(mut self, sections: Vec<String>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_section_detection(mut self, enable: bool) -> Self {
        self.detect_sections = enable;
        self
    }
}

impl ResumeSource for FileResumeSource {
    async fn load(&mut self) -> Result<ResumeDocument> {
        let text = InputManager::new().extract_text(&self.path).await?;
        let entities = self.recognizer.recognize(&text)?;

        let mut document = ResumeDocument::new(text)
            .with_sections(self.sections.clone())
            .with_entities(entities);

        if self.detect_sections {
            let detected = SectionDetector::new()?.detect(&document.text);
            debug!("Detected sections: {:?}", detected);
            document.merge_sections(&detected);
        }

        info!(
            "Loaded resume {} ({} words, {} sections, {} entities)",
            self.path.display(),
            document.word_count(),
            document.parsed_sections.len(),
            document.extracted_entities.len()
        );

        Ok(document)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl JsonDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResumeSource for JsonDocumentSource {
    async fn load(&mut self) -> Result<ResumeDocument> {
        let content = fs::read_to_string(&self.path).await?;
        let document = serde_json::from_str::<ResumeDocument>(&content).map_err(|e| {
            AtsScorerError::Validation(format!(
                "Invalid resume document {}: {}",
                self.path.display(),
                e
            ))
        })?;

        info!(
            "Loaded resume document {} ({} entities)",
            self.path.display(),
            document.extracted_entities.len()
        );

        Ok(document)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
