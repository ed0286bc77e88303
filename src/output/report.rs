//! Report structures wrapping a score result for presentation

use crate::processing::scorer::ScoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A score result plus everything a formatter needs to present it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: ScoreResult,

    /// Qualitative band for the overall score
    pub rating: ScoreRating,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the scorer used
    pub scorer_version: String,

    /// Resume file or document analyzed
    pub resume_source: String,

    /// Where the job keywords came from
    pub keyword_source: String,

    /// Distinct keywords scored against
    pub keyword_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreReport {
    pub fn new(
        result: ScoreResult,
        resume_source: impl Into<String>,
        keyword_source: impl Into<String>,
        keyword_count: usize,
    ) -> Self {
        let rating = ScoreRating::from_score(result.ats_score);
        Self {
            result,
            rating,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scorer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_source: resume_source.into(),
                keyword_source: keyword_source.into(),
                keyword_count,
            },
        }
    }
}

impl ScoreRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ScoreRating::Excellent
        } else if score >= 70.0 {
            ScoreRating::Good
        } else if score >= 50.0 {
            ScoreRating::Fair
        } else {
            ScoreRating::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "EXCELLENT",
            ScoreRating::Good => "GOOD",
            ScoreRating::Fair => "FAIR",
            ScoreRating::Poor => "POOR",
        }
    }

    /// One-line verdict shown under the score
    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Your resume is well optimized for applicant tracking systems.",
            ScoreRating::Good => "Your resume should pass most ATS filters with a few tweaks.",
            ScoreRating::Fair => "Your resume may be filtered out; address the suggestions below.",
            ScoreRating::Poor => "Your resume is unlikely to pass ATS screening as it stands.",
        }
    }
}
