//! career-matcher: resume parsing and job matching from the command line

use career_matcher::advice::{advice_or_fallback, PromptParams, PromptTemplates, RuleBasedAdvisor};
use career_matcher::cli::{self, CatalogAction, Cli, Commands, ConfigAction, MatchArgs, ModelAction};
use career_matcher::config::{Config, EmbeddingBackend, OutputFormat};
use career_matcher::error::{CareerMatcherError, Result};
use career_matcher::matching::embedding_manager::EmbeddingModelManager;
use career_matcher::matching::{
    HashingEmbedder, JobCatalog, JobMatcher, StaticModelEmbedder, TextEmbedder,
};
use career_matcher::output::{save_report_to_file, suggest_filename, MatchReport, ReportGenerator};
use career_matcher::processing::{ManualProfile, ResumeParser};
use career_matcher::service::CareerService;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Parse { resume, output } => {
            validate_resume(&resume)?;
            let format = output_format(output.as_deref(), &config)?;

            let parser = ResumeParser::new(config.extraction.clone());
            let record = parser.parse(&resume)?;

            let report = MatchReport::for_candidate(record);
            println!("{}", report_generator(&config, false, true).generate_report(&report, format)?);
        }

        Commands::Match(args) => run_match(args, &config).await?,

        Commands::Advise { resume, show_prompt } => {
            validate_resume(&resume)?;

            let parser = ResumeParser::new(config.extraction.clone());
            let record = parser.parse(&resume)?;

            if record.skills.is_empty() {
                warn!("No skills found in {}; advice will be general", record.source_file);
            }
            println!("{}\n", format!("Career advice for {}", record.name).bold());
            println!("{}", advice_or_fallback(&RuleBasedAdvisor, &record));

            if show_prompt {
                let prompt = PromptTemplates::default().render_career_advice(&PromptParams::from(&record));
                println!("\n{}\n{}", "Prompt".bold(), prompt);
            }
        }

        Commands::Catalog { action } => match action {
            CatalogAction::Init { path, force } => {
                let path = path.unwrap_or_else(|| config.matching.catalog_path.clone());
                if path.exists() && !force {
                    println!("Catalog already exists at {} (use --force to overwrite)", path.display());
                    return Ok(());
                }
                JobCatalog::from_listings(JobCatalog::default_listings()).write_csv(&path)?;
                info!("Created default jobs file at {}", path.display());
                println!("Wrote seed catalog to {}", path.display());
            }

            CatalogAction::Show { path } => {
                let path = path.unwrap_or_else(|| config.matching.catalog_path.clone());
                let catalog = JobCatalog::load(&path)?;
                println!("{} ({} postings)\n", path.display(), catalog.len());
                for (i, listing) in catalog.listings().iter().enumerate() {
                    println!(
                        "{:>3}. {} | {} | {} | {}",
                        i + 1,
                        listing.title,
                        listing.company,
                        listing.location,
                        listing.link
                    );
                }
            }
        },

        Commands::Models { action } => {
            let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    println!("Embedding models in {}\n", config.models_dir().display());
                    for (id, info) in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(id) {
                            "downloaded".green().to_string()
                        } else {
                            "available".dimmed().to_string()
                        };
                        println!(
                            "  {:<16} {:>4} MB  {:>3}d  [{}]  {}",
                            id, info.size_mb, info.dimensions, status, info.description
                        );
                    }
                    println!(
                        "\nRecommended: {}",
                        manager.auto_select_model().cyan()
                    );
                }

                ModelAction::Download { model } => {
                    let model_id = manager.resolve_model_id(&model).ok_or_else(|| {
                        CareerMatcherError::ModelError(format!("Unknown embedding model: {}", model))
                    })?;
                    if manager.is_model_downloaded(&model_id) {
                        println!("Model '{}' is already downloaded", model_id);
                        return Ok(());
                    }
                    let path = manager.download_model(&model_id).await?;
                    println!("Model '{}' downloaded to {}", model_id, path.display());
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    CareerMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("# {}\n{}", config_path.display(), content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn run_match(args: MatchArgs, config: &Config) -> Result<()> {
    let start_time = Instant::now();
    let format = output_format(args.output.as_deref(), config)?;
    let top_n = args.top_n.unwrap_or(config.matching.top_n);
    if top_n == 0 {
        return Err(CareerMatcherError::InvalidInput("--top-n must be at least 1".to_string()));
    }
    if let Some(resume) = &args.resume {
        validate_resume(resume)?;
    }

    let catalog_path = args
        .catalog
        .clone()
        .unwrap_or_else(|| config.matching.catalog_path.clone());
    let catalog = JobCatalog::load(&catalog_path)?;
    let catalog_size = catalog.len();

    let embedder = build_embedder(config, args.embedding.as_deref()).await;
    let embedder_name = embedder.name().to_string();

    let spinner = spinner(format!("Embedding {} postings with {}", catalog_size, embedder_name));
    let matcher = JobMatcher::new(catalog, embedder);
    spinner.finish_and_clear();

    let service = CareerService::new(
        ResumeParser::new(config.extraction.clone()),
        Arc::new(matcher?),
        Box::new(RuleBasedAdvisor),
    );

    let recommendation = match &args.resume {
        Some(resume) => service.recommend_for_file(resume, top_n)?,
        None => {
            let profile = ManualProfile::from_form(
                args.skills.as_deref().unwrap_or_default(),
                args.experience.as_deref().unwrap_or_default(),
                args.education.as_deref().unwrap_or_default(),
            );
            service.recommend_for_manual(&profile, top_n)?
        }
    };

    let report = MatchReport::from_recommendation(
        recommendation,
        &embedder_name,
        catalog_size,
        top_n,
        start_time.elapsed().as_millis() as u64,
    );

    let content = report_generator(config, args.detailed, true).generate_report(&report, format)?;
    match &args.save {
        Some(save) => {
            let path = if save.is_dir() {
                save.join(suggest_filename(format, report.subject(), true))
            } else {
                save.clone()
            };
            // Saved console reports carry no color escapes
            let plain = if format == OutputFormat::Console {
                report_generator(config, args.detailed, false).generate_report(&report, format)?
            } else {
                content.clone()
            };
            save_report_to_file(&plain, &path)?;
            println!("{}", content);
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

/// Pick the embedder for this run. A Model2Vec model that cannot be found or
/// loaded degrades to feature hashing instead of failing the command.
async fn build_embedder(config: &Config, requested: Option<&str>) -> Arc<dyn TextEmbedder> {
    let hashing = || -> Arc<dyn TextEmbedder> {
        Arc::new(HashingEmbedder::new(config.models.hashing_dimension))
    };

    let model = match requested {
        Some(name) if name.eq_ignore_ascii_case("hashing") => return hashing(),
        Some(name) => name.to_string(),
        None if config.models.embedding_backend == EmbeddingBackend::Hashing => return hashing(),
        None => config.models.embedding_model.clone(),
    };

    match load_static_model(config, &model).await {
        Ok(embedder) => Arc::new(embedder),
        Err(e) => {
            warn!("Could not load embedding model {}: {}", model, e);
            warn!("Falling back to hashing embeddings");
            hashing()
        }
    }
}

async fn load_static_model(config: &Config, model: &str) -> Result<StaticModelEmbedder> {
    // A local directory or an unregistered hub repo goes straight to model2vec-rs
    let local = PathBuf::from(model);
    if local.is_dir() {
        return StaticModelEmbedder::load(&local, model);
    }

    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
    match manager.resolve_model_id(model) {
        Some(model_id) => {
            let path = manager.ensure_model_available(&model_id).await?;
            StaticModelEmbedder::load(&path, &model_id)
        }
        None => StaticModelEmbedder::load(&local, model),
    }
}

fn validate_resume(path: &Path) -> Result<()> {
    cli::validate_file_extension(path, &cli::RESUME_EXTENSIONS)
        .map_err(|e| CareerMatcherError::UnsupportedFormat(format!("{}: {}", path.display(), e)))
}

fn output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(CareerMatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn report_generator(config: &Config, detailed: bool, use_colors: bool) -> ReportGenerator {
    ReportGenerator::with_options(
        use_colors && config.output.color_output,
        detailed || config.output.detailed,
        true,
        true,
        true,
    )
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
