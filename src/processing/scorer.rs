//! Composite ATS scoring: keyword, section and format components

use crate::processing::document::{JobKeywords, ResumeDocument};
use crate::processing::format_evaluator::{FormatEvaluation, FormatEvaluator};
use crate::processing::keyword_matcher::{KeywordEvaluation, KeywordMatch, KeywordMatcher};
use crate::processing::section_evaluator::{SectionEvaluation, SectionEvaluator, SectionStatus};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_ATS_SCORE: f64 = 100.0;

/// Stateless scoring engine. Identical inputs always give identical results.
#[derive(Debug, Clone, Default)]
pub struct AtsScorer {
    keyword_matcher: KeywordMatcher,
    section_evaluator: SectionEvaluator,
    format_evaluator: FormatEvaluator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_score: f64,
    pub section_score: f64,
    pub format_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub ats_score: f64,
    pub breakdown: ScoreBreakdown,
    pub matched_keywords: BTreeSet<String>,
    pub missing_keywords: Vec<String>,
    pub inferred_sections: Vec<String>,
    pub suggestions: Vec<String>,
    /// Per-keyword match kinds, for detailed reports
    pub keyword_matches: Vec<KeywordMatch>,
    pub section_statuses: Vec<SectionStatus>,
    pub word_count: usize,
}

impl AtsScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, resume: &ResumeDocument, keywords: &JobKeywords) -> ScoreResult {
        let keyword_eval = self.keyword_matcher.evaluate(resume, keywords);
        let section_eval = self.section_evaluator.evaluate(resume);
        let format_eval = self.format_evaluator.evaluate(&resume.text);

        let result = Self::aggregate(keyword_eval, section_eval, format_eval);
        info!(
            "ATS score {:.2} (keywords {:.2}, sections {:.2}, format {:.2})",
            result.ats_score,
            result.breakdown.keyword_score,
            result.breakdown.section_score,
            result.breakdown.format_score
        );
        result
    }

    fn aggregate(
        keyword_eval: KeywordEvaluation,
        section_eval: SectionEvaluation,
        format_eval: FormatEvaluation,
    ) -> ScoreResult {
        let total = keyword_eval.score + section_eval.score + format_eval.score;
        let ats_score = round_to_hundredths(total.clamp(0.0, MAX_ATS_SCORE));

        let mut suggestions = Vec::new();
        suggestions.extend(keyword_eval.suggestion.clone());
        suggestions.extend(section_eval.suggestion.clone());
        suggestions.extend(format_eval.suggestions);

        ScoreResult {
            ats_score,
            breakdown: ScoreBreakdown {
                keyword_score: keyword_eval.score,
                section_score: section_eval.score,
                format_score: format_eval.score,
            },
            matched_keywords: keyword_eval.matched_keywords(),
            missing_keywords: keyword_eval.missing,
            inferred_sections: section_eval.inferred_sections(),
            suggestions,
            keyword_matches: keyword_eval.matches,
            section_statuses: section_eval.statuses,
            word_count: format_eval.word_count,
        }
    }
}

/// Convenience wrapper around a default [`AtsScorer`]
pub fn score_resume(resume: &ResumeDocument, keywords: &JobKeywords) -> ScoreResult {
    AtsScorer::new().score(resume, keywords)
}

/// Exact halves round to the even hundredth
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::{Entity, EntityLabel};

    fn keywords(items: &[&str]) -> JobKeywords {
        items.iter().copied().collect()
    }

    #[test]
    fn test_keywords_only() {
        let resume = ResumeDocument::new("python sql aws");
        let result = score_resume(&resume, &keywords(&["Python", "SQL", "AWS", "Docker"]));

        assert_eq!(result.breakdown.keyword_score, 30.0);
        assert_eq!(result.breakdown.section_score, 0.0);
        assert_eq!(result.breakdown.format_score, 30.0);
        assert_eq!(result.ats_score, 60.0);
        assert_eq!(result.missing_keywords, vec!["Docker".to_string()]);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn test_suggestion_order() {
        let text = format!("lorem ipsum {}", vec!["filler"; 1298].join(" "));
        let resume = ResumeDocument::new(text);
        let result = score_resume(&resume, &keywords(&["rust"]));

        assert_eq!(result.suggestions.len(), 4);
        assert!(result.suggestions[0].starts_with("Add missing keywords"));
        assert!(result.suggestions[1].starts_with("Make sure to include"));
        assert!(result.suggestions[2].starts_with("Keep your resume under 2 pages"));
        assert!(result.suggestions[3].starts_with("Remove placeholder text"));
    }

    #[test]
    fn test_total_clamped_to_hundred() {
        let text = format!("rust {}", vec!["word"; 500].join(" "));
        let resume = ResumeDocument::new(text).with_sections(["experience", "education", "skills"]);
        let result = score_resume(&resume, &keywords(&["rust"]));

        assert_eq!(result.breakdown.format_score, 35.0);
        assert_eq!(result.ats_score, 100.0);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let resume = ResumeDocument::new("rust");
        let result = score_resume(&resume, &keywords(&["rust", "go", "java"]));

        // 40/3 + 0 + 30
        assert_eq!(result.ats_score, 43.33);
    }

    #[test]
    fn test_exact_half_rounds_to_even() {
        let mut items = vec!["rust".to_string()];
        items.extend((1..64).map(|i| format!("k{}", i)));
        let keywords = JobKeywords::from(items);

        let result = score_resume(&ResumeDocument::new("rust"), &keywords);

        assert_eq!(result.breakdown.keyword_score, 0.625);
        assert_eq!(result.ats_score, 30.62);
        assert_eq!(round_to_hundredths(0.125), 0.12);
        assert_eq!(round_to_hundredths(0.375), 0.38);
    }

    #[test]
    fn test_inferred_sections_reported() {
        let resume = ResumeDocument::new("engineer").with_entities(vec![
            Entity::new("Acme", EntityLabel::Organization),
            Entity::new("Globex", EntityLabel::Organization),
            Entity::new("Initech", EntityLabel::Organization),
            Entity::new("Jan 2018", EntityLabel::Date),
            Entity::new("Feb 2020", EntityLabel::Date),
            Entity::new("2022", EntityLabel::Date),
        ]);
        let result = score_resume(&resume, &JobKeywords::default());

        assert_eq!(
            result.inferred_sections,
            vec!["experience".to_string(), "education".to_string()]
        );
        assert_eq!(result.breakdown.section_score, 20.0);
    }
}
