//! Required-section presence, with entity-based inference as fallback

use crate::processing::document::{EntityLabel, ResumeDocument, SectionType};
use log::debug;
use serde::{Deserialize, Serialize};

/// Maximum points the section component contributes
pub const SECTION_WEIGHT: f64 = 30.0;

/// Sections every resume is expected to carry, in reporting order
pub const REQUIRED_SECTIONS: [SectionType; 3] = [
    SectionType::Experience,
    SectionType::Education,
    SectionType::Skills,
];

const MIN_EXPERIENCE_ORGANIZATIONS: usize = 3;
const MIN_EXPERIENCE_DATES: usize = 3;
const EDUCATION_MARKERS: [&str; 2] = ["university", "college"];

#[derive(Debug, Clone, Default)]
pub struct SectionEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionPresence {
    Explicit,
    Inferred,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStatus {
    pub section: SectionType,
    pub presence: SectionPresence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEvaluation {
    pub score: f64,
    pub statuses: Vec<SectionStatus>,
    pub suggestion: Option<String>,
}

impl SectionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, resume: &ResumeDocument) -> SectionEvaluation {
        let statuses: Vec<SectionStatus> = REQUIRED_SECTIONS
            .iter()
            .map(|&section| SectionStatus {
                section,
                presence: Self::presence(resume, section),
            })
            .collect();

        let satisfied = statuses
            .iter()
            .filter(|s| s.presence != SectionPresence::Missing)
            .count();
        let score = satisfied as f64 * SECTION_WEIGHT / REQUIRED_SECTIONS.len() as f64;

        debug!("Section score {:.2}: {:?}", score, statuses);

        let suggestion = if score < SECTION_WEIGHT {
            let missing: Vec<String> = statuses
                .iter()
                .filter(|s| s.presence == SectionPresence::Missing)
                .map(|s| s.section.to_string())
                .collect();
            Some(format!(
                "Make sure to include these sections: {}.",
                missing.join(", ")
            ))
        } else {
            None
        };

        SectionEvaluation {
            score,
            statuses,
            suggestion,
        }
    }

    fn presence(resume: &ResumeDocument, section: SectionType) -> SectionPresence {
        if resume.has_section(section.key()) {
            return SectionPresence::Explicit;
        }

        let inferred = match section {
            SectionType::Experience => Self::infer_experience(resume),
            SectionType::Education => Self::infer_education(resume),
            // Generic entity labels say nothing reliable about these
            SectionType::Skills
            | SectionType::Summary
            | SectionType::Projects
            | SectionType::Certifications => false,
        };

        if inferred {
            SectionPresence::Inferred
        } else {
            SectionPresence::Missing
        }
    }

    fn infer_experience(resume: &ResumeDocument) -> bool {
        let organizations = resume.entities_labeled(EntityLabel::Organization).count();
        let dates = resume.entities_labeled(EntityLabel::Date).count();

        organizations >= MIN_EXPERIENCE_ORGANIZATIONS && dates >= MIN_EXPERIENCE_DATES
    }

    fn infer_education(resume: &ResumeDocument) -> bool {
        let has_institution = resume
            .entities_labeled(EntityLabel::Organization)
            .any(|e| {
                let text = e.text.to_lowercase();
                EDUCATION_MARKERS.iter().any(|m| text.contains(m))
            });

        has_institution
            || resume
                .entities_labeled(EntityLabel::Date)
                .any(|e| is_year(&e.text))
    }
}

impl SectionEvaluation {
    /// Sections satisfied by inference rather than an explicit label
    pub fn inferred_sections(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|s| s.presence == SectionPresence::Inferred)
            .map(|s| s.section.key().to_string())
            .collect()
    }
}

fn is_year(text: &str) -> bool {
    text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit())
}
