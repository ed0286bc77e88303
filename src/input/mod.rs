//! Input processing module
//! Handles file detection, text extraction and the collaborators that feed the scorer

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
pub mod entities;
pub mod keywords;
pub mod source;
