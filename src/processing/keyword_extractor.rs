//! Job description keyword extraction

use crate::error::{AtsScorerError, Result};
use crate::processing::document::JobKeywords;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Pulls candidate keywords out of free-form job description text.
/// Words are ranked by frequency, ties broken by first appearance.
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
    noise_regex: Regex,
    max_keywords: usize,
    min_length: usize,
}

impl KeywordExtractor {
    pub fn new(max_keywords: usize, min_length: usize) -> Result<Self> {
        // URLs and email addresses never make useful keywords
        let noise_regex = Regex::new(r"https?://\S+|[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .map_err(|e| AtsScorerError::Processing(format!("Invalid noise pattern: {}", e)))?;

        Ok(Self {
            stop_words: Self::create_stop_words(),
            noise_regex,
            max_keywords,
            min_length,
        })
    }

    pub fn extract(&self, text: &str) -> JobKeywords {
        let cleaned = self.noise_regex.replace_all(text, " ");

        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, word) in cleaned.unicode_words().enumerate() {
            let token = word.to_lowercase();
            if !self.is_candidate(&token) {
                continue;
            }
            counts.entry(token).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(word, _)| word)
            .collect()
    }

    fn is_candidate(&self, token: &str) -> bool {
        token.chars().count() >= self.min_length
            && token.chars().any(|c| c.is_alphabetic())
            && !self.stop_words.contains(token)
    }

    /// Common English words plus boilerplate found in most job postings
    fn create_stop_words() -> HashSet<&'static str> {
        [
            "a", "about", "above", "across", "after", "all", "also", "an", "and", "any",
            "are", "as", "at", "be", "been", "being", "both", "but", "by", "can", "could",
            "do", "does", "each", "either", "etc", "for", "from", "had", "has", "have",
            "how", "if", "in", "into", "is", "it", "its", "may", "more", "most", "must",
            "no", "not", "of", "on", "or", "other", "our", "out", "over", "own", "per",
            "plus", "should", "so", "such", "than", "that", "the", "their", "them",
            "then", "there", "these", "they", "this", "those", "through", "to", "under",
            "up", "us", "using", "very", "via", "was", "we", "well", "were", "what",
            "when", "where", "which", "while", "who", "whom", "why", "will", "with",
            "within", "would", "you", "your",
            // Posting boilerplate
            "ability", "apply", "benefits", "candidate", "candidates", "company",
            "environment", "equal", "excellent", "experience", "good", "great",
            "ideal", "including", "join", "looking", "opportunity", "plus", "preferred",
            "required", "requirements", "responsibilities", "role", "skills", "strong",
            "team", "work", "working", "years",
        ]
        .into_iter()
        .collect()
    }
}
