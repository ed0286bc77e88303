//! ATS scorer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{AtsScorerError, Result};
pub use processing::document::{Entity, EntityLabel, JobKeywords, ResumeDocument};
pub use processing::scorer::{score_resume, AtsScorer, ScoreBreakdown, ScoreResult};
