//! Scoring engine and the document model it consumes

pub mod document;
pub mod keyword_matcher;
pub mod section_evaluator;
pub mod format_evaluator;
pub mod scorer;
pub mod keyword_extractor;
