//! Entity collaborator: precomputed named entities for a resume

use crate::error::{AtsScorerError, Result};
use crate::processing::document::Entity;
use log::info;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// Supplies named entities for resume text. The scorer never runs NER
/// itself; implementations wrap whatever produced the entities.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>>;
}

/// Used when no entity annotations are available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntities;

impl EntityRecognizer for NoEntities {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>> {
        Ok(Vec::new())
    }
}

/// Entities computed ahead of time, e.g. by an external NLP pipeline
#[derive(Debug, Clone, Default)]
pub struct PrecomputedEntities {
    entities: Vec<Entity>,
}

impl PrecomputedEntities {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(load_entities(path).await?))
    }
}

impl EntityRecognizer for PrecomputedEntities {
    fn recognize(&self, _text: &str) -> Result<Vec<Entity>> {
        Ok(self.entities.clone())
    }
}

// Accepts either a bare array or an object wrapping one under "entities"
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityFile {
    List(Vec<serde_json::Value>),
    Wrapped { entities: Vec<serde_json::Value> },
}

/// Parse and validate entity records, failing on the first malformed one
pub fn parse_entities(json: &str) -> Result<Vec<Entity>> {
    let records = match serde_json::from_str::<EntityFile>(json) {
        Ok(EntityFile::List(records)) | Ok(EntityFile::Wrapped { entities: records }) => records,
        Err(e) => {
            return Err(AtsScorerError::Validation(format!(
                "Entity file must be a JSON array of {{text, label}} records: {}",
                e
            )))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<Entity>(record).map_err(|e| {
                AtsScorerError::Validation(format!("Entity record {}: {}", index, e))
            })
        })
        .collect()
}

pub async fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let content = fs::read_to_string(path).await?;
    let entities = parse_entities(&content)?;
    info!("Loaded {} entities from {}", entities.len(), path.display());
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::EntityLabel;

    #[test]
    fn test_parse_entity_array() {
        let json = r#"[
            {"text": "Acme Corp", "label": "ORG"},
            {"text": "2019", "label": "date"},
            {"text": "AWS", "label": "Product"}
        ]"#;

        let entities = parse_entities(json).unwrap();
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0].label, EntityLabel::Organization);
        assert_eq!(entities[1].label, EntityLabel::Date);
        assert_eq!(entities[2].text, "AWS");
    }

    #[test]
    fn test_parse_wrapped_entities() {
        let json = r#"{"entities": [{"text": "Berlin", "label": "GPE"}]}"#;

        let entities = parse_entities(json).unwrap();
        assert_eq!(entities, vec![Entity::new("Berlin", EntityLabel::Location)]);
    }

    #[test]
    fn test_missing_label_fails_fast() {
        let json = r#"[{"text": "Acme"}, {"text": "x", "label": "ORG"}]"#;

        let err = parse_entities(json).unwrap_err();
        assert!(matches!(err, AtsScorerError::Validation(ref msg) if msg.contains("record 0")));
    }

    #[test]
    fn test_missing_text_fails_fast() {
        let json = r#"[{"text": "Acme", "label": "ORG"}, {"label": "DATE"}]"#;

        let err = parse_entities(json).unwrap_err();
        assert!(matches!(err, AtsScorerError::Validation(ref msg) if msg.contains("record 1")));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let json = r#"[{"text": "three", "label": "CARDINAL"}]"#;
        assert!(parse_entities(json).is_err());
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            parse_entities(r#""just a string""#),
            Err(AtsScorerError::Validation(_))
        ));
    }

    #[test]
    fn test_shape_error_keeps_parser_detail() {
        let err = parse_entities("[{\"text\": \"Acme\"").unwrap_err();
        let AtsScorerError::Validation(msg) = err else {
            panic!("expected validation error");
        };

        assert!(msg.starts_with("Entity file must be a JSON array of {text, label} records: "));
        assert!(msg.len() > "Entity file must be a JSON array of {text, label} records: ".len());
    }

    #[test]
    fn test_recognizers() {
        let precomputed = PrecomputedEntities::new(vec![Entity::new("Acme", EntityLabel::Organization)]);

        assert_eq!(precomputed.recognize("ignored").unwrap().len(), 1);
        assert!(NoEntities.recognize("ignored").unwrap().is_empty());
    }
}
