//! Job keyword loading

use crate::error::{AtsScorerError, Result};
use crate::input::manager::InputManager;
use crate::processing::document::JobKeywords;
use crate::processing::keyword_extractor::KeywordExtractor;
use log::info;
use std::path::Path;
use tokio::fs;

/// Split a comma- or newline-separated keyword list
pub fn parse_keyword_list(input: &str) -> JobKeywords {
    input
        .split([',', '\n', ';'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

pub async fn load_keyword_file(path: &Path) -> Result<JobKeywords> {
    let content = fs::read_to_string(path).await?;
    let keywords = parse_keyword_list(&content);

    if keywords.is_empty() {
        return Err(AtsScorerError::InvalidInput(format!(
            "Keyword file contains no keywords: {}",
            path.display()
        )));
    }

    info!("Loaded {} keywords from {}", keywords.len(), path.display());
    Ok(keywords)
}

/// Extract keywords from a job description text or markdown file
pub async fn extract_job_keywords(
    manager: &InputManager,
    path: &Path,
    extractor: &KeywordExtractor,
) -> Result<JobKeywords> {
    let text = manager.extract_text(path).await?;
    let keywords = extractor.extract(&text);

    if keywords.is_empty() {
        return Err(AtsScorerError::InvalidInput(format!(
            "No keywords could be extracted from: {}",
            path.display()
        )));
    }

    info!("Extracted {} keywords from {}", keywords.len(), path.display());
    Ok(keywords)
}
