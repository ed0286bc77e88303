//! Output formatters for score reports

use crate::config::OutputFormat;
use crate::error::{AtsScorerError, Result};
use crate::output::report::{ScoreRating, ScoreReport};
use crate::processing::keyword_matcher::{MatchType, KEYWORD_WEIGHT};
use crate::processing::section_evaluator::{SectionPresence, SECTION_WEIGHT};
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Highest format sub-score, base plus length bonus
const FORMAT_MAX: f64 = 35.0;

pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Score Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .score-breakdown { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
        .score-item { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .suggestions { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #ffc107; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Score Report</h1>
            <p>Generated: {{ generated_at }}</p>
        </div>

        <h2>Overall Score: {{ ats_score }} <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
        <p><strong>Verdict:</strong> {{ verdict }}</p>

        <div class="score-breakdown">
            <div class="score-item"><h4>Keywords</h4><p><strong>{{ keyword_score }}</strong> / {{ keyword_max }}</p></div>
            <div class="score-item"><h4>Sections</h4><p><strong>{{ section_score }}</strong> / {{ section_max }}</p></div>
            <div class="score-item"><h4>Format</h4><p><strong>{{ format_score }}</strong> / {{ format_max }}</p></div>
        </div>

        <h2>Matched Keywords</h2>
        {% if matched.is_empty() %}<p>None</p>{% else %}
        <ul>{% for keyword in matched %}<li>{{ keyword }}</li>{% endfor %}</ul>
        {% endif %}

        <h2>Missing Keywords</h2>
        {% if missing.is_empty() %}<p>None</p>{% else %}
        <ul>{% for keyword in missing %}<li>{{ keyword }}</li>{% endfor %}</ul>
        {% endif %}

        {% if !inferred.is_empty() %}
        <h2>Inferred Sections</h2>
        <ul>{% for section in inferred %}<li>{{ section }}</li>{% endfor %}</ul>
        {% endif %}

        <h2>Suggestions</h2>
        <div class="suggestions">
            {% if suggestions.is_empty() %}<p>No changes needed.</p>{% else %}
            <ul>{% for suggestion in suggestions %}<li>{{ suggestion }}</li>{% endfor %}</ul>
            {% endif %}
        </div>

        <div class="metadata">
            <p><strong>Generated by ATS Scorer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_source }} | <strong>Keywords:</strong> {{ keyword_source }} ({{ keyword_count }})</p>
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    ats_score: String,
    score_class: &'static str,
    score_label: &'static str,
    verdict: &'static str,
    keyword_score: String,
    keyword_max: String,
    section_score: String,
    section_max: String,
    format_score: String,
    format_max: String,
    matched: Vec<String>,
    missing: Vec<String>,
    inferred: Vec<String>,
    suggestions: Vec<String>,
    version: String,
    resume_source: String,
    keyword_source: String,
    keyword_count: usize,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, rating: ScoreRating) -> String {
        let color = match rating {
            ScoreRating::Excellent => Color::Green,
            ScoreRating::Good => Color::BrightGreen,
            ScoreRating::Fair => Color::Yellow,
            ScoreRating::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", rating.label().color(color).bold())
        } else {
            format!("[{}]", rating.label())
        }
    }

    fn format_list(&self, items: &[String], color: Color) -> String {
        if items.is_empty() {
            return "  (none)\n".to_string();
        }
        items
            .iter()
            .map(|item| format!("  • {}\n", self.colorize(item, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS SCORE REPORT", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("Resume: {}\n", report.metadata.resume_source));

        output.push_str(&self.format_header("Overall", 2));
        output.push_str(&format!(
            "ATS Score: {:.2} / 100 {}\n",
            result.ats_score,
            self.format_score_badge(report.rating)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.rating.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!("Keywords: {:.2} / {:.0}\n", result.breakdown.keyword_score, KEYWORD_WEIGHT));
        output.push_str(&format!("Sections: {:.2} / {:.0}\n", result.breakdown.section_score, SECTION_WEIGHT));
        output.push_str(&format!("Format:   {:.2} / {:.0}\n", result.breakdown.format_score, FORMAT_MAX));

        let matched: Vec<String> = result.matched_keywords.iter().cloned().collect();
        output.push_str(&self.format_header(
            &format!("Matched Keywords ({}/{})", matched.len(), report.metadata.keyword_count),
            3,
        ));
        output.push_str(&self.format_list(&matched, Color::Green));

        output.push_str(&self.format_header("Missing Keywords", 3));
        output.push_str(&self.format_list(&result.missing_keywords, Color::Red));

        if !result.inferred_sections.is_empty() {
            output.push_str(&self.format_header("Inferred Sections", 3));
            output.push_str(&self.format_list(&result.inferred_sections, Color::Yellow));
        }

        if self.detailed {
            output.push_str(&self.format_header("Keyword Matches", 3));
            for m in &result.keyword_matches {
                let how = match m.match_type {
                    MatchType::Literal => "found in resume text",
                    MatchType::Entity => "found in an extracted entity",
                };
                output.push_str(&format!("  • {} ({})\n", m.keyword, how));
            }

            output.push_str(&self.format_header("Required Sections", 3));
            for status in &result.section_statuses {
                let (state, color) = match status.presence {
                    SectionPresence::Explicit => ("present", Color::Green),
                    SectionPresence::Inferred => ("inferred", Color::Yellow),
                    SectionPresence::Missing => ("missing", Color::Red),
                };
                output.push_str(&format!("  • {}: {}\n", status.section, self.colorize(state, color)));
            }

            output.push_str(&format!("\nWord count: {}\n", result.word_count));
        }

        output.push_str(&self.format_header("Suggestions", 2));
        if result.suggestions.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("No changes needed.", Color::Green)));
        } else {
            for (i, suggestion) in result.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None_\n".to_string();
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let result = &report.result;
        let mut md = String::new();

        md.push_str("# ATS Score Report\n\n");
        md.push_str(&format!(
            "**ATS Score:** {:.2} / 100 ({})\n\n",
            result.ats_score,
            report.rating.label()
        ));
        md.push_str(&format!("> {}\n\n", report.rating.verdict()));

        md.push_str("## Score Breakdown\n\n");
        md.push_str("| Component | Score | Max |\n");
        md.push_str("|-----------|-------|-----|\n");
        md.push_str(&format!("| Keywords | {:.2} | {:.0} |\n", result.breakdown.keyword_score, KEYWORD_WEIGHT));
        md.push_str(&format!("| Sections | {:.2} | {:.0} |\n", result.breakdown.section_score, SECTION_WEIGHT));
        md.push_str(&format!("| Format | {:.2} | {:.0} |\n\n", result.breakdown.format_score, FORMAT_MAX));

        let matched: Vec<String> = result.matched_keywords.iter().cloned().collect();
        md.push_str("## Matched Keywords\n\n");
        md.push_str(&Self::markdown_list(&matched));
        md.push_str("\n## Missing Keywords\n\n");
        md.push_str(&Self::markdown_list(&result.missing_keywords));

        if !result.inferred_sections.is_empty() {
            md.push_str("\n## Inferred Sections\n\n");
            md.push_str(&Self::markdown_list(&result.inferred_sections));
        }

        md.push_str("\n## Suggestions\n\n");
        if result.suggestions.is_empty() {
            md.push_str("No changes needed.\n");
        } else {
            for (i, suggestion) in result.suggestions.iter().enumerate() {
                md.push_str(&format!("{}. {}\n", i + 1, suggestion));
            }
        }

        if self.include_metadata {
            md.push_str("\n---\n\n");
            md.push_str(&format!(
                "_Generated {} by ATS Scorer v{} for {} ({} keywords from {})_\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.scorer_version,
                report.metadata.resume_source,
                report.metadata.keyword_count,
                report.metadata.keyword_source
            ));
        }

        Ok(md)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScoreReport) -> HtmlTemplate {
        let result = &report.result;
        let score_class = match report.rating {
            ScoreRating::Excellent => "score-excellent",
            ScoreRating::Good => "score-good",
            ScoreRating::Fair => "score-fair",
            ScoreRating::Poor => "score-poor",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ats_score: format!("{:.2}", result.ats_score),
            score_class,
            score_label: report.rating.label(),
            verdict: report.rating.verdict(),
            keyword_score: format!("{:.2}", result.breakdown.keyword_score),
            keyword_max: format!("{:.0}", KEYWORD_WEIGHT),
            section_score: format!("{:.2}", result.breakdown.section_score),
            section_max: format!("{:.0}", SECTION_WEIGHT),
            format_score: format!("{:.2}", result.breakdown.format_score),
            format_max: format!("{:.0}", FORMAT_MAX),
            matched: result.matched_keywords.iter().cloned().collect(),
            missing: result.missing_keywords.clone(),
            inferred: result.inferred_sections.clone(),
            suggestions: result.suggestions.clone(),
            version: report.metadata.scorer_version.clone(),
            resume_source: report.metadata.resume_source.clone(),
            keyword_source: report.metadata.keyword_source.clone(),
            keyword_count: report.metadata.keyword_count,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content).map_err(|e| {
        AtsScorerError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e))
    })
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats_score.{}", base_name, extension)
}

/// Where `--save` writes: the path itself, or a suggested file name inside it
/// when it names an existing directory
pub fn resolve_save_path(save: &Path, format: &OutputFormat, resume_name: &str) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, resume_name))
    } else {
        save.to_path_buf()
    }
}
