//! Text extraction from resume files

use crate::error::{AtsScorerError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AtsScorerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Self::markdown_to_text(&markdown_content)
    }
}

impl MarkdownExtractor {
    /// Render markdown to HTML, then strip tags so only the prose is scored
    pub fn markdown_to_text(markdown: &str) -> Result<String> {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let block_end_regex = Regex::new(r"</(?:p|h[1-6]|li|ul|ol|blockquote|pre)>|<br\s*/?>")
            .map_err(|e| AtsScorerError::Processing(format!("Invalid block pattern: {}", e)))?;
        let tag_regex = Regex::new(r"<[^>]*>")
            .map_err(|e| AtsScorerError::Processing(format!("Invalid tag pattern: {}", e)))?;

        let with_breaks = block_end_regex.replace_all(&html_output, "\n");
        let clean_text = tag_regex
            .replace_all(&with_breaks, "")
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_strips_formatting() {
        let markdown = "# Jane Roe\n\n## Skills\n\n- **Rust**\n- SQL &amp; AWS\n";
        let text = MarkdownExtractor::markdown_to_text(markdown).unwrap();

        assert!(text.contains("Jane Roe"));
        assert!(text.contains("Skills"));
        assert!(text.contains("Rust"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_headings_stay_on_their_own_line() {
        let text = MarkdownExtractor::markdown_to_text("## Education\nState College, 2019").unwrap();
        assert_eq!(text.lines().next(), Some("Education"));
    }
}
