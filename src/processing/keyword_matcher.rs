//! Keyword matching against resume text and extracted entities

use crate::processing::document::{EntityLabel, JobKeywords, ResumeDocument};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum points the keyword component contributes
pub const KEYWORD_WEIGHT: f64 = 40.0;

/// Scores below this trigger the missing-keyword suggestion
pub const KEYWORD_SUGGESTION_THRESHOLD: f64 = 30.0;

/// How many missing keywords the suggestion names
pub const MISSING_KEYWORD_PREVIEW: usize = 5;

/// Entity labels whose text may stand in for a literal keyword hit
pub const RELEVANT_ENTITY_LABELS: [EntityLabel; 3] = [
    EntityLabel::Organization,
    EntityLabel::Product,
    EntityLabel::Event,
];

/// Matches job keywords literally and through relevant entities
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Literal,
    Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEvaluation {
    pub score: f64,
    pub matches: Vec<KeywordMatch>,
    pub missing: Vec<String>,
    pub suggestion: Option<String>,
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Partition the distinct keywords into matched and missing
    pub fn evaluate(&self, resume: &ResumeDocument, keywords: &JobKeywords) -> KeywordEvaluation {
        let resume_text = resume.text.to_lowercase();
        let entity_texts: Vec<String> = resume
            .extracted_entities
            .iter()
            .filter(|e| RELEVANT_ENTITY_LABELS.contains(&e.label))
            .map(|e| e.text.to_lowercase())
            .collect();

        let unique = keywords.unique();
        let mut matches = Vec::new();
        let mut missing = Vec::new();

        for keyword in &unique {
            let needle = keyword.to_lowercase();

            let match_type = if resume_text.contains(&needle) {
                Some(MatchType::Literal)
            } else if entity_texts.iter().any(|t| t.contains(&needle)) {
                Some(MatchType::Entity)
            } else {
                None
            };

            match match_type {
                Some(match_type) => matches.push(KeywordMatch {
                    keyword: keyword.to_string(),
                    match_type,
                }),
                None => missing.push(keyword.to_string()),
            }
        }

        let score = if unique.is_empty() {
            0.0
        } else {
            matches.len() as f64 * KEYWORD_WEIGHT / unique.len() as f64
        };

        debug!(
            "Keyword score {:.2}: {} matched, {} missing",
            score,
            matches.len(),
            missing.len()
        );

        let suggestion = if score < KEYWORD_SUGGESTION_THRESHOLD && !missing.is_empty() {
            let preview: Vec<&str> = missing
                .iter()
                .take(MISSING_KEYWORD_PREVIEW)
                .map(String::as_str)
                .collect();
            Some(format!("Add missing keywords: {}", preview.join(", ")))
        } else {
            None
        };

        KeywordEvaluation {
            score,
            matches,
            missing,
            suggestion,
        }
    }
}

impl KeywordEvaluation {
    pub fn matched_keywords(&self) -> BTreeSet<String> {
        self.matches.iter().map(|m| m.keyword.clone()).collect()
    }
}
