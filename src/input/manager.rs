//! Routes resume and job description files to a text extractor by file type

use crate::error::{AtsScorerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the document type of `path`, rejecting missing files and
    /// types no text can be extracted from
    pub fn document_type(path: &Path) -> Result<FileType> {
        if !path.exists() {
            return Err(AtsScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path).ok_or_else(|| {
            AtsScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        if !file_type.is_document() {
            return Err(AtsScorerError::UnsupportedFormat(format!(
                "Cannot extract text from {:?} file: {}",
                file_type,
                path.display()
            )));
        }

        Ok(file_type)
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        let file_type = Self::document_type(path)?;
        info!("Reading {:?} document: {}", file_type, path.display());

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            other => {
                return Err(AtsScorerError::UnsupportedFormat(format!(
                    "No text extractor for {:?}",
                    other
                )))
            }
        };

        debug!("Extracted {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}
