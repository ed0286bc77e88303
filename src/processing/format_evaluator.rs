//! Length and placeholder-text checks

use log::debug;
use serde::{Deserialize, Serialize};

pub const FORMAT_BASE_SCORE: f64 = 30.0;
pub const OVER_LENGTH_PENALTY: f64 = 10.0;
pub const PLACEHOLDER_PENALTY: f64 = 5.0;
pub const LENGTH_BONUS: f64 = 5.0;

pub const MIN_BONUS_WORDS: usize = 400;
pub const MAX_WORDS: usize = 1200;

pub const PLACEHOLDER_TEXT: &str = "lorem ipsum";

pub const LENGTH_SUGGESTION: &str = "Keep your resume under 2 pages (approx. 1000–1200 words).";
pub const PLACEHOLDER_SUGGESTION: &str = "Remove placeholder text like 'lorem ipsum'.";

#[derive(Debug, Clone, Default)]
pub struct FormatEvaluator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatEvaluation {
    pub score: f64,
    pub word_count: usize,
    pub has_placeholder: bool,
    /// Length suggestion first, then placeholder
    pub suggestions: Vec<String>,
}

impl FormatEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, text: &str) -> FormatEvaluation {
        let word_count = text.split_whitespace().count();
        let has_placeholder = text.to_lowercase().contains(PLACEHOLDER_TEXT);

        // An empty resume has no format to reward
        if word_count == 0 {
            return FormatEvaluation {
                score: 0.0,
                word_count,
                has_placeholder,
                suggestions: Vec::new(),
            };
        }

        let mut score = FORMAT_BASE_SCORE;
        let mut suggestions = Vec::new();

        if word_count > MAX_WORDS {
            score -= OVER_LENGTH_PENALTY;
            suggestions.push(LENGTH_SUGGESTION.to_string());
        }

        if has_placeholder {
            score -= PLACEHOLDER_PENALTY;
            suggestions.push(PLACEHOLDER_SUGGESTION.to_string());
        }

        if (MIN_BONUS_WORDS..=MAX_WORDS).contains(&word_count) {
            score += LENGTH_BONUS;
        }

        let score = score.max(0.0);
        debug!("Format score {:.2} for {} words", score, word_count);

        FormatEvaluation {
            score,
            word_count,
            has_placeholder,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_short_resume_keeps_base_score() {
        let eval = FormatEvaluator::new().evaluate("python sql aws");

        assert_eq!(eval.word_count, 3);
        assert_eq!(eval.score, 30.0);
        assert!(eval.suggestions.is_empty());
    }

    #[test]
    fn test_length_bonus_bounds() {
        let evaluator = FormatEvaluator::new();

        assert_eq!(evaluator.evaluate(&words(399)).score, 30.0);
        assert_eq!(evaluator.evaluate(&words(400)).score, 35.0);
        assert_eq!(evaluator.evaluate(&words(1200)).score, 35.0);
        assert_eq!(evaluator.evaluate(&words(1201)).score, 20.0);
    }

    #[test]
    fn test_over_length_penalty() {
        let eval = FormatEvaluator::new().evaluate(&words(1300));

        assert_eq!(eval.score, 20.0);
        assert_eq!(eval.suggestions, vec![LENGTH_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_placeholder_combines_with_bonus() {
        let text = format!("Lorem Ipsum {}", words(500));
        let eval = FormatEvaluator::new().evaluate(&text);

        assert!(eval.has_placeholder);
        assert_eq!(eval.score, 30.0);
        assert_eq!(eval.suggestions, vec![PLACEHOLDER_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_both_penalties_in_order() {
        let text = format!("lorem ipsum {}", words(1298));
        let eval = FormatEvaluator::new().evaluate(&text);

        assert_eq!(eval.word_count, 1300);
        assert_eq!(eval.score, 15.0);
        assert_eq!(
            eval.suggestions,
            vec![LENGTH_SUGGESTION.to_string(), PLACEHOLDER_SUGGESTION.to_string()]
        );
    }

    #[test]
    fn test_words_split_on_any_whitespace() {
        let eval = FormatEvaluator::new().evaluate("  one\ttwo\n\nthree  ");
        assert_eq!(eval.word_count, 3);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let evaluator = FormatEvaluator::new();

        assert_eq!(evaluator.evaluate("").score, 0.0);
        assert_eq!(evaluator.evaluate(" \n\t ").score, 0.0);
        assert!(evaluator.evaluate("").suggestions.is_empty());
    }
}
