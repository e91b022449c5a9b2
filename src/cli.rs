//! Command-line interface

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

#[derive(Parser)]
#[command(name = "career-matcher")]
#[command(version)]
#[command(about = "Parse resumes and match candidates against job postings")]
#[command(long_about = "Extract contact details, skills, experience and education from PDF, DOCX or text resumes, then rank job postings by embedding similarity to the candidate profile")]
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

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured fields from a resume
    Parse {
        /// Resume file (PDF, DOCX, TXT)
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rank job postings for a resume or a hand-entered profile
    Match(MatchArgs),

    /// Career advice for a resume
    Advise {
        /// Resume file (PDF, DOCX, TXT)
        resume: PathBuf,

        /// Also print the prompt an external language model would receive
        #[arg(long)]
        show_prompt: bool,
    },

    /// Job catalog commands
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct MatchArgs {
    /// Resume file (PDF, DOCX, TXT)
    #[arg(short, long, conflicts_with_all = ["skills", "experience", "education"])]
    pub resume: Option<PathBuf>,

    /// Comma-separated skills, used instead of a resume
    #[arg(short, long, required_unless_present = "resume")]
    pub skills: Option<String>,

    /// Free-text experience for a manual profile
    #[arg(long, requires = "skills")]
    pub experience: Option<String>,

    /// Free-text education for a manual profile
    #[arg(long, requires = "skills")]
    pub education: Option<String>,

    /// Job catalog CSV (defaults to the configured catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Number of postings to return
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Embedding backend: "hashing" or a Model2Vec model id
    #[arg(short, long)]
    pub embedding: Option<String>,

    /// Output format: console, json, markdown, html
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Include profile text and links in console output
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Write the seed catalog if none exists
    Init {
        /// Catalog path (defaults to the configured catalog)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing catalog
        #[arg(short, long)]
        force: bool,
    },

    /// List the postings in a catalog
    Show {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List known and downloaded embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, repo id or display name
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Err("File has no extension".to_string()),
    }
}
