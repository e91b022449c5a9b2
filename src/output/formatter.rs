//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{CareerMatcherError, Result};
use crate::output::report::{MatchReport, ScoreBand};
use crate::processing::CandidateRecord;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;

    fn supports_format(&self) -> OutputFormat;
}

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
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Job Recommendations: {{ subject }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 { color: #007acc; border-bottom: 3px solid #007acc; padding-bottom: 10px; }
        h2 { color: #495057; border-bottom: 2px solid #e9ecef; padding-bottom: 6px; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .badge { padding: 2px 10px; border-radius: 12px; color: white; font-weight: bold; }
        .band-strong { background: #28a745; }
        .band-moderate { background: #ffc107; color: #000; }
        .band-weak { background: #dc3545; }
        .skills span { display: inline-block; background: #e7f3ff; border-radius: 4px; padding: 2px 8px; margin: 2px; }
        .footer { margin-top: 30px; font-size: 0.85em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
<div class="container">
    <h1>Job Recommendations</h1>
    <p>Generated {{ generated_at }}</p>
    {% if has_candidate %}
    <h2>Candidate</h2>
    <table>
        <tr><th>Name</th><td>{{ name }}</td></tr>
        <tr><th>Email</th><td>{{ email }}</td></tr>
        <tr><th>Phone</th><td>{{ phone }}</td></tr>
        <tr><th>Experience</th><td>{{ experience }}</td></tr>
        <tr><th>Education</th><td>{{ education }}</td></tr>
    </table>
    <p class="skills">{% for skill in skills %}<span>{{ skill }}</span>{% endfor %}</p>
    {% endif %}
    {% if has_matching %}
    <h2>Top Matches</h2>
    {% if rows.is_empty() %}
    <p>No matching jobs found.</p>
    {% else %}
    <table>
        <tr><th>#</th><th>Title</th><th>Company</th><th>Location</th><th>Match</th></tr>
        {% for row in rows %}
        <tr>
            <td>{{ row.rank }}</td>
            <td><a href="{{ row.link }}">{{ row.title }}</a></td>
            <td>{{ row.company }}</td>
            <td>{{ row.location }}</td>
            <td><span class="badge {{ row.band_class }}">{{ row.score }}</span></td>
        </tr>
        {% endfor %}
    </table>
    {% endif %}
    {% endif %}
    {% if has_advice %}
    <h2>Career Advice</h2>
    {% for paragraph in advice %}<p>{{ paragraph }}</p>{% endfor %}
    {% endif %}
    <div class="footer">career-matcher {{ version }}{% if has_matching %} | embedder: {{ embedder }} | catalog: {{ catalog_size }} postings{% endif %}</div>
</div>
</body>
</html>"#
)]
struct HtmlTemplate {
    include_styles: bool,
    subject: String,
    generated_at: String,
    has_candidate: bool,
    name: String,
    email: String,
    phone: String,
    experience: String,
    education: String,
    skills: Vec<String>,
    has_matching: bool,
    rows: Vec<HtmlMatchRow>,
    has_advice: bool,
    advice: Vec<String>,
    version: String,
    embedder: String,
    catalog_size: usize,
}

struct HtmlMatchRow {
    rank: usize,
    title: String,
    company: String,
    location: String,
    link: String,
    score: String,
    band_class: &'static str,
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
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

    fn format_band(&self, score: f32) -> String {
        let band = ScoreBand::from_score(score);
        let color = match band {
            ScoreBand::Strong => Color::Green,
            ScoreBand::Moderate => Color::Yellow,
            ScoreBand::Weak => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_candidate(&self, candidate: &CandidateRecord) -> String {
        let mut output = String::new();
        output.push_str(&self.format_header("Candidate", 2));
        output.push_str(&format!("Name:       {}\n", self.colorize(&candidate.name, Color::Cyan)));
        output.push_str(&format!("Email:      {}\n", or_dash(&candidate.email)));
        output.push_str(&format!("Phone:      {}\n", or_dash(&candidate.phone)));
        output.push_str(&format!("Skills:     {}\n", or_dash(&candidate.skills.join(", "))));
        output.push_str(&format!("Experience: {}\n", or_dash(&candidate.experience)));
        output.push_str(&format!("Education:  {}\n", or_dash(&candidate.education)));

        if self.detailed {
            output.push_str(&format!(
                "Source:     {} ({} characters)\n",
                candidate.source_file, candidate.text_length
            ));
            output.push_str(&format!("Preview:    {}\n", candidate.raw_text_preview));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB RECOMMENDATIONS", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if let Some(candidate) = &report.candidate {
            output.push_str(&self.format_candidate(candidate));
        }

        if report.has_matching() {
            output.push_str(&self.format_header("Top Matches", 2));
            if report.matches.is_empty() {
                output.push_str("No matching jobs found.\n");
            }
            for (i, job) in report.matches.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} at {} ({})\n   Match: {:.1}% {}\n",
                    i + 1,
                    self.colorize(&job.title, Color::Cyan),
                    job.company,
                    job.location,
                    job.percent(),
                    self.format_band(job.match_score)
                ));
                if self.detailed {
                    output.push_str(&format!("   Link: {}\n", job.link));
                }
            }
        }

        if let Some(advice) = &report.advice {
            output.push_str(&self.format_header("Career Advice", 2));
            output.push_str(advice);
            output.push('\n');
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!("Profile text: {}\n", report.profile_text));
            if let Some(embedder) = &report.metadata.embedder {
                output.push_str(&format!(
                    "Embedder: {} | Catalog: {} postings | top_n: {} | {}ms\n",
                    embedder,
                    report.metadata.catalog_size,
                    report.metadata.top_n,
                    report.metadata.processing_time_ms
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    /// Keep cell text from breaking the table
    fn cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# Job Recommendations: {}\n\n", report.subject()));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        if let Some(candidate) = &report.candidate {
            output.push_str("## Candidate\n\n");
            output.push_str(&format!("- **Name:** {}\n", candidate.name));
            output.push_str(&format!("- **Email:** {}\n", or_dash(&candidate.email)));
            output.push_str(&format!("- **Phone:** {}\n", or_dash(&candidate.phone)));
            output.push_str(&format!(
                "- **Skills:** {}\n",
                or_dash(&candidate.skills.join(", "))
            ));
            output.push_str(&format!("- **Experience:** {}\n", or_dash(&candidate.experience)));
            output.push_str(&format!("- **Education:** {}\n\n", or_dash(&candidate.education)));
        }

        if report.has_matching() {
            output.push_str("## Top Matches\n\n");
            if report.matches.is_empty() {
                output.push_str("No matching jobs found.\n\n");
            } else {
                output.push_str("| # | Title | Company | Location | Match |\n");
                output.push_str("|---|-------|---------|----------|-------|\n");
                for (i, job) in report.matches.iter().enumerate() {
                    output.push_str(&format!(
                        "| {} | [{}]({}) | {} | {} | {:.1}% |\n",
                        i + 1,
                        Self::cell(&job.title),
                        job.link,
                        Self::cell(&job.company),
                        Self::cell(&job.location),
                        job.percent()
                    ));
                }
                output.push('\n');
            }
        }

        if let Some(advice) = &report.advice {
            output.push_str("## Career Advice\n\n");
            output.push_str(advice);
            output.push_str("\n\n");
        }

        if self.include_metadata {
            if let Some(embedder) = &report.metadata.embedder {
                output.push_str(&format!(
                    "---\n*career-matcher {} | embedder: {} | catalog: {} postings*\n",
                    report.metadata.tool_version, embedder, report.metadata.catalog_size
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let candidate = report.candidate.clone().unwrap_or_default();

        let rows = report
            .matches
            .iter()
            .enumerate()
            .map(|(i, job)| HtmlMatchRow {
                rank: i + 1,
                title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                link: job.link.clone(),
                score: format!("{:.1}%", job.percent()),
                band_class: match ScoreBand::from_score(job.match_score) {
                    ScoreBand::Strong => "band-strong",
                    ScoreBand::Moderate => "band-moderate",
                    ScoreBand::Weak => "band-weak",
                },
            })
            .collect();

        let advice = report
            .advice
            .as_deref()
            .map(|text| {
                text.split("\n\n")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        HtmlTemplate {
            include_styles: self.include_styles,
            subject: report.subject().to_string(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            has_candidate: report.candidate.is_some(),
            name: candidate.name,
            email: or_dash(&candidate.email).to_string(),
            phone: or_dash(&candidate.phone).to_string(),
            experience: or_dash(&candidate.experience).to_string(),
            education: or_dash(&candidate.education).to_string(),
            skills: candidate.skills,
            has_matching: report.has_matching(),
            rows,
            has_advice: report.advice.is_some(),
            advice,
            version: report.metadata.tool_version.clone(),
            embedder: report.metadata.embedder.clone().unwrap_or_default(),
            catalog_size: report.metadata.catalog_size,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| CareerMatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
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

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, subject: &str, timestamp: bool) -> String {
    let base_name = Path::new(subject)
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(' ', "_"))
        .unwrap_or_else(|| "profile".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_matches{}.{}", base_name, timestamp_suffix, extension)
}
