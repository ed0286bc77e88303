//! CLI interface for the ATS scorer

use crate::config::OutputFormat;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ats-scorer")]
#[command(about = "Score a resume against job keywords the way an applicant tracking system would")]
#[command(long_about = "Compute a 0-100 ATS compatibility score from keyword matches, required resume sections and format checks, with suggestions for improving it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a resume against a set of job keywords
    Score(ScoreArgs),

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("resume_input").required(true).args(["resume", "document"])))]
#[command(group(ArgGroup::new("keyword_input").required(true).args(["keywords", "keywords_file", "job"])))]
pub struct ScoreArgs {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Path to a JSON resume document with text, parsed_sections and extracted_entities
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Comma-separated job keywords
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// File with one keyword per line or comma-separated keywords
    #[arg(long)]
    pub keywords_file: Option<PathBuf>,

    /// Job description file (TXT, MD) to extract keywords from
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Section labels present in the resume, e.g. "experience,skills"
    #[arg(long, value_delimiter = ',')]
    pub sections: Vec<String>,

    /// JSON file of precomputed named entities ({text, label} records)
    #[arg(short, long)]
    pub entities: Option<PathBuf>,

    /// Detect section headings in the resume text
    #[arg(long)]
    pub detect_sections: bool,

    /// Output format: console, json, markdown, html
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to a file, or into a directory under a name derived from the resume
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Show per-keyword and per-section details
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
