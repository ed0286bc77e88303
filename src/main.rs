//! ATS scorer: resume compatibility scoring against job keywords

use ats_scorer::cli::{self, Cli, Commands, ConfigAction, ScoreArgs};
use ats_scorer::config::Config;
use ats_scorer::error::{AtsScorerError, Result};
use ats_scorer::input::entities::{load_entities, EntityRecognizer, NoEntities, PrecomputedEntities};
use ats_scorer::input::keywords::{extract_job_keywords, load_keyword_file, parse_keyword_list};
use ats_scorer::input::manager::InputManager;
use ats_scorer::input::source::{FileResumeSource, JsonDocumentSource, ResumeSource};
use ats_scorer::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use ats_scorer::output::report::ScoreReport;
use ats_scorer::processing::document::{JobKeywords, ResumeDocument, SectionDetector};
use ats_scorer::processing::keyword_extractor::KeywordExtractor;
use ats_scorer::processing::scorer::AtsScorer;
use clap::Parser;
use log::{error, info};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Score(args) => run_score(args, &config).await,

        Commands::Config { action } => {
            let path = cli.config.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        AtsScorerError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n{}", path.display(), content);
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }
            }
            Ok(())
        }
    }
}

async fn run_score(args: ScoreArgs, config: &Config) -> Result<()> {
    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(AtsScorerError::InvalidInput)?,
        None => config.output.format,
    };

    let (keywords, keyword_source) = load_keywords(&args, config).await?;
    let (resume, resume_source) = load_resume(&args, config).await?;

    info!(
        "Scoring {} against {} keywords from {}",
        resume_source,
        keywords.unique().len(),
        keyword_source
    );

    let result = AtsScorer::new().score(&resume, &keywords);
    let report = ScoreReport::new(result, resume_source, keyword_source, keywords.unique().len());

    let generator = ReportGenerator::with_options(
        config.output.color_output && args.save.is_none(),
        args.detailed || config.output.detailed,
        config.output.pretty_json,
        true,
        true,
    );
    let rendered = generator.generate_report(&report, &output_format)?;

    match &args.save {
        Some(save) => {
            let path = resolve_save_path(save, &output_format, &report.metadata.resume_source);
            save_report_to_file(&rendered, &path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn load_keywords(args: &ScoreArgs, config: &Config) -> Result<(JobKeywords, String)> {
    if let Some(list) = &args.keywords {
        let keywords = parse_keyword_list(list);
        if keywords.is_empty() {
            return Err(AtsScorerError::InvalidInput("No keywords given".to_string()));
        }
        return Ok((keywords, "command line".to_string()));
    }

    if let Some(path) = &args.keywords_file {
        let keywords = load_keyword_file(path).await?;
        return Ok((keywords, path.display().to_string()));
    }

    if let Some(path) = &args.job {
        cli::validate_file_extension(path, &["txt", "md", "pdf"])
            .map_err(|e| AtsScorerError::InvalidInput(format!("Job description file: {}", e)))?;

        let extractor = KeywordExtractor::new(config.keywords.max_extracted, config.keywords.min_length)?;
        let keywords = extract_job_keywords(&InputManager::new(), path, &extractor).await?;
        return Ok((keywords, path.display().to_string()));
    }

    Err(AtsScorerError::InvalidInput(
        "One of --keywords, --keywords-file or --job is required".to_string(),
    ))
}

async fn load_resume(args: &ScoreArgs, config: &Config) -> Result<(ResumeDocument, String)> {
    let detect_sections = args.detect_sections || config.input.detect_sections;

    if let Some(path) = &args.document {
        let mut source = JsonDocumentSource::new(path);
        let mut document = source.load().await?;

        // Flags given alongside a document add to what it already carries
        for section in &args.sections {
            if !document.has_section(section) {
                document.parsed_sections.push(section.clone());
            }
        }
        if detect_sections {
            let detected = SectionDetector::new()?.detect(&document.text);
            document.merge_sections(&detected);
        }
        if let Some(entities_path) = &args.entities {
            document.extracted_entities.extend(load_entities(entities_path).await?);
        }

        return Ok((document, source.describe()));
    }

    let Some(path) = &args.resume else {
        return Err(AtsScorerError::InvalidInput(
            "One of --resume or --document is required".to_string(),
        ));
    };

    cli::validate_file_extension(path, &["pdf", "txt", "md"])
        .map_err(|e| AtsScorerError::InvalidInput(format!("Resume file: {}", e)))?;

    let recognizer: Box<dyn EntityRecognizer> = match &args.entities {
        Some(entities_path) => Box::new(PrecomputedEntities::from_file(entities_path).await?),
        None => Box::new(NoEntities),
    };

    let mut source = FileResumeSource::new(path, recognizer)
        .with_sections(args.sections.clone())
        .with_section_detection(detect_sections);

    let document = source.load().await?;
    Ok((document, source.describe()))
}
