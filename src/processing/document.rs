//! Document structures consumed by the scoring engine

use crate::error::{AtsScorerError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Resume text plus whatever the ingestion collaborator annotated it with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub text: String,
    #[serde(default)]
    pub parsed_sections: Vec<String>,
    #[serde(default)]
    pub extracted_entities: Vec<Entity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Fixed entity vocabulary understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum EntityLabel {
    Organization,
    Location,
    Date,
    Person,
    Quantity,
    Product,
    Event,
    WorkOfArt,
    Law,
    Language,
}

/// Ordered job keywords. Duplicates are kept as given but matched as a set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobKeywords(Vec<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Skills,
    Experience,
    Education,
    Summary,
    Projects,
    Certifications,
}

/// Finds resume section headings in plain text
pub struct SectionDetector {
    heading_matcher: AhoCorasick,
    heading_sections: Vec<SectionType>,
}

impl ResumeDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parsed_sections: Vec::new(),
            extracted_entities: Vec::new(),
        }
    }

    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parsed_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.extracted_entities = entities;
        self
    }

    /// Case-insensitive check against the explicit section labels
    pub fn has_section(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.parsed_sections
            .iter()
            .any(|s| s.trim().to_lowercase() == wanted)
    }

    /// Add sections not already labeled, keeping existing order
    pub fn merge_sections(&mut self, detected: &[SectionType]) {
        for section in detected {
            if !self.has_section(section.key()) {
                self.parsed_sections.push(section.key().to_string());
            }
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn entities_labeled(&self, label: EntityLabel) -> impl Iterator<Item = &Entity> {
        self.extracted_entities.iter().filter(move |e| e.label == label)
    }
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Organization => "organization",
            EntityLabel::Location => "location",
            EntityLabel::Date => "date",
            EntityLabel::Person => "person",
            EntityLabel::Quantity => "quantity",
            EntityLabel::Product => "product",
            EntityLabel::Event => "event",
            EntityLabel::WorkOfArt => "work-of-art",
            EntityLabel::Law => "law",
            EntityLabel::Language => "language",
        }
    }
}

impl FromStr for EntityLabel {
    type Err = AtsScorerError;

    /// Accepts the vocabulary names as well as the usual NER short tags
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        let label = match normalized.as_str() {
            "organization" | "organisation" | "org" => EntityLabel::Organization,
            "location" | "loc" | "gpe" => EntityLabel::Location,
            "date" => EntityLabel::Date,
            "person" | "per" => EntityLabel::Person,
            "quantity" => EntityLabel::Quantity,
            "product" => EntityLabel::Product,
            "event" => EntityLabel::Event,
            "work-of-art" => EntityLabel::WorkOfArt,
            "law" => EntityLabel::Law,
            "language" => EntityLabel::Language,
            _ => {
                return Err(AtsScorerError::Validation(format!(
                    "Unknown entity label: '{}'",
                    s
                )))
            }
        };
        Ok(label)
    }
}

impl TryFrom<String> for EntityLabel {
    type Error = AtsScorerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl JobKeywords {
    /// Distinct keywords ignoring case, keeping the first spelling seen
    pub fn unique(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .map(String::as_str)
            .filter(|k| seen.insert(k.to_lowercase()))
            .collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for JobKeywords {
    fn from(keywords: Vec<String>) -> Self {
        Self(keywords)
    }
}

impl<S: Into<String>> FromIterator<S> for JobKeywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl SectionType {
    /// Lowercase label as it appears in `parsed_sections`
    pub fn key(&self) -> &'static str {
        match self {
            SectionType::Skills => "skills",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Summary => "summary",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Summary => write!(f, "Summary"),
            SectionType::Projects => write!(f, "Projects"),
            SectionType::Certifications => write!(f, "Certifications"),
        }
    }
}

// Headings longer than this are treated as body text.
const MAX_HEADING_WORDS: usize = 4;

impl SectionDetector {
    pub fn new() -> Result<Self> {
        let headings = Self::default_headings();

        let patterns: Vec<&str> = headings.iter().map(|(p, _)| *p).collect();
        let heading_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| AtsScorerError::Processing(format!("Failed to build section detector: {}", e)))?;

        Ok(Self {
            heading_matcher,
            heading_sections: headings.into_iter().map(|(_, s)| s).collect(),
        })
    }

    /// Detect sections from heading-like lines, in order of first appearance
    pub fn detect(&self, text: &str) -> Vec<SectionType> {
        let mut found = Vec::new();

        for line in text.lines() {
            let heading = line.trim().trim_end_matches(':').trim();
            if heading.is_empty() || heading.split_whitespace().count() > MAX_HEADING_WORDS {
                continue;
            }

            let Some(mat) = self.heading_matcher.find(heading) else {
                continue;
            };

            // "Experienced developer" is a sentence, not a heading
            let ends_on_boundary = heading[mat.end()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());

            if mat.start() == 0 && ends_on_boundary {
                let section = self.heading_sections[mat.pattern().as_usize()];
                if !found.contains(&section) {
                    found.push(section);
                }
            }
        }

        found
    }

    fn default_headings() -> Vec<(&'static str, SectionType)> {
        vec![
            ("skills", SectionType::Skills),
            ("technical skills", SectionType::Skills),
            ("core competencies", SectionType::Skills),
            ("expertise", SectionType::Skills),
            ("experience", SectionType::Experience),
            ("work experience", SectionType::Experience),
            ("professional experience", SectionType::Experience),
            ("employment history", SectionType::Experience),
            ("employment", SectionType::Experience),
            ("work history", SectionType::Experience),
            ("education", SectionType::Education),
            ("academic background", SectionType::Education),
            ("qualifications", SectionType::Education),
            ("summary", SectionType::Summary),
            ("professional summary", SectionType::Summary),
            ("profile", SectionType::Summary),
            ("objective", SectionType::Summary),
            ("projects", SectionType::Projects),
            ("notable projects", SectionType::Projects),
            ("portfolio", SectionType::Projects),
            ("certifications", SectionType::Certifications),
            ("certificates", SectionType::Certifications),
            ("licenses", SectionType::Certifications),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_defaults() {
        let doc: ResumeDocument = serde_json::from_str(r#"{"text": "Rust developer"}"#).unwrap();

        assert_eq!(doc.text, "Rust developer");
        assert!(doc.parsed_sections.is_empty());
        assert!(doc.extracted_entities.is_empty());
        assert_eq!(doc.word_count(), 2);
    }

    #[test]
    fn test_missing_text_is_rejected() {
        let result: std::result::Result<ResumeDocument, _> =
            serde_json::from_str(r#"{"parsed_sections": ["skills"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_has_section_ignores_case() {
        let doc = ResumeDocument::new("text").with_sections(["Experience ", "SKILLS"]);

        assert!(doc.has_section("experience"));
        assert!(doc.has_section("skills"));
        assert!(!doc.has_section("education"));
    }

    #[test]
    fn test_entity_label_aliases() {
        assert_eq!("ORG".parse::<EntityLabel>().unwrap(), EntityLabel::Organization);
        assert_eq!("GPE".parse::<EntityLabel>().unwrap(), EntityLabel::Location);
        assert_eq!("WORK_OF_ART".parse::<EntityLabel>().unwrap(), EntityLabel::WorkOfArt);
        assert_eq!("work-of-art".parse::<EntityLabel>().unwrap(), EntityLabel::WorkOfArt);
        assert_eq!("Product".parse::<EntityLabel>().unwrap(), EntityLabel::Product);
        assert!("CARDINAL".parse::<EntityLabel>().is_err());
    }

    #[test]
    fn test_entity_label_serializes_kebab_case() {
        let entity = Entity::new("Mona Lisa", EntityLabel::WorkOfArt);
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"text":"Mona Lisa","label":"work-of-art"}"#);

        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
    }

    #[test]
    fn test_unique_keywords_keep_first_occurrence() {
        let keywords: JobKeywords = ["Rust", "SQL", "Rust", "Go"].into_iter().collect();

        assert_eq!(keywords.len(), 4);
        assert_eq!(keywords.unique(), vec!["Rust", "SQL", "Go"]);
    }

    #[test]
    fn test_unique_keywords_ignore_case() {
        let keywords: JobKeywords = ["Python", "python", "Go", "PYTHON", "go"].into_iter().collect();

        assert_eq!(keywords.unique(), vec!["Python", "Go"]);
    }

    #[test]
    fn test_section_detection() {
        let detector = SectionDetector::new().unwrap();
        let text = "John Doe\n\nSummary:\nExperienced developer\n\nWork Experience\nSoftware Engineer at Company\n\nSKILLS\nRust, Python";

        let sections = detector.detect(text);
        assert_eq!(
            sections,
            vec![SectionType::Summary, SectionType::Experience, SectionType::Skills]
        );
    }

    #[test]
    fn test_section_detection_skips_sentences() {
        let detector = SectionDetector::new().unwrap();
        let text = "Experienced engineer with education in physics and many skills across the stack";

        assert!(detector.detect(text).is_empty());
    }

    #[test]
    fn test_merge_sections_skips_existing_labels() {
        let mut doc = ResumeDocument::new("text").with_sections(["Skills"]);
        doc.merge_sections(&[SectionType::Skills, SectionType::Education]);

        assert_eq!(doc.parsed_sections, vec!["Skills".to_string(), "education".to_string()]);
    }
}
