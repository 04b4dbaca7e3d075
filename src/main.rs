//! Resume ranker: rank resumes against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, ModelAction, RankArgs};
use resume_ranker::input::{collect_resume_paths, DocumentTextExtractor, TextExtractor};
use resume_ranker::output::{save_report_to_file, RankingReport, ReportGenerator, ReportMetadata};
use resume_ranker::processing::embedding_manager::EmbeddingModelManager;
use resume_ranker::processing::Model2VecEmbedder;
use resume_ranker::ranking::RankingPipeline;
use resume_ranker::{Config, OutputFormat, Result, ResumeRankerError};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
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

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Rank(args) => run_rank(args, config).await,
        Commands::Models { action } => run_models(action, config).await,
        Commands::Config { action } => run_config(action, config, config_path),
    }
}

async fn run_rank(args: RankArgs, mut config: Config) -> Result<()> {
    let start_time = Instant::now();

    let (job_description, job_source) = match (&args.job, &args.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, &["txt", "md", "pdf"]).map_err(|e| {
                ResumeRankerError::InvalidInput(format!("Job description file: {}", e))
            })?;
            let text = DocumentTextExtractor::new().extract_text(path)?;
            if text.trim().is_empty() {
                return Err(ResumeRankerError::InvalidInput(format!(
                    "Job description has no readable text: {}",
                    path.display()
                )));
            }
            (text, path.display().to_string())
        }
        (None, Some(text)) => (text.clone(), "inline".to_string()),
        (None, None) => {
            return Err(ResumeRankerError::InvalidInput(
                "Provide --job or --job-text".to_string(),
            ))
        }
    };

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeRankerError::InvalidInput)?,
        None => config.output.format,
    };

    let save_path = cli::resolve_save_path(&args.save, output_format, &job_source);

    let resumes = collect_resume_paths(&args.resumes)?;
    if resumes.is_empty() {
        return Err(ResumeRankerError::InvalidInput(
            "No resume files found".to_string(),
        ));
    }
    info!("Ranking {} resumes against {}", resumes.len(), job_source);

    if let Some(model) = &args.embedding {
        config.models.default_embedding_model = model.clone();
    }
    let embedder = Model2VecEmbedder::from_config(&config).await?;
    let model_name = embedder.model_name().to_string();

    let mut pipeline = RankingPipeline::from_config(&config, Arc::new(embedder));
    if let Some(seed) = args.seed {
        pipeline = pipeline.with_phrase_seed(seed);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Scoring {} resumes...", resumes.len()));

    let run = if args.sequential {
        pipeline.rank_sequential_with_report(&job_description, &resumes)
    } else {
        pipeline.rank_with_report(&job_description, &resumes).await
    };
    spinner.finish_and_clear();

    let metadata = ReportMetadata::new(
        job_source,
        model_name,
        config.scoring.weights(),
        config.scoring.scale,
    )
    .with_processing_time(start_time.elapsed().as_millis() as u64);
    let mut report = RankingReport::new(run, metadata);
    if let Some(top) = args.top {
        report.truncate(top);
    }

    let detailed = args.detailed || config.output.detailed;
    // No escape codes in saved files
    let use_colors = config.output.color_output && save_path.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
    let content = generator.generate_report(&report, output_format)?;

    match &save_path {
        Some(path) => {
            save_report_to_file(&content, path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

async fn run_models(action: ModelAction, config: Config) -> Result<()> {
    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

    match action {
        ModelAction::List => {
            println!("Embedding Models\n");
            for (id, info) in manager.list_available_models() {
                let status = if manager.is_model_downloaded(id) {
                    "Downloaded"
                } else {
                    "Available"
                };
                println!("  • {} - {} ({}) - {} MB [{}]", id, info.name, info.repo_id, info.size_mb, status);
                println!("    {}", info.description);
            }
            println!("\nDefault: {}", config.models.default_embedding_model);
            println!("Recommended: {}", manager.auto_select_model());
        }

        ModelAction::Download { model, force } => {
            let model_id = manager.resolve_model_id(&model).ok_or_else(|| {
                ResumeRankerError::ModelError(format!("Unknown embedding model: {}", model))
            })?;

            if manager.is_model_downloaded(&model_id) {
                if !force {
                    println!("Model '{}' is already downloaded. Use --force to re-download.", model_id);
                    return Ok(());
                }
                manager.remove_model(&model_id).await?;
            }

            let model_path = manager.download_model(&model_id).await?;
            println!("Model '{}' downloaded to {}", model_id, model_path.display());
        }

        ModelAction::Remove { model } => {
            manager.remove_model(&model).await?;
            println!("Model '{}' removed", model);
        }

        ModelAction::Info { model } => {
            let model_id = manager.resolve_model_id(&model).ok_or_else(|| {
                ResumeRankerError::ModelError(format!("Unknown embedding model: {}", model))
            })?;
            let info = manager.get_model_info(&model_id).ok_or_else(|| {
                ResumeRankerError::ModelError(format!("No catalog entry for model: {}", model_id))
            })?;

            println!("Model Information for '{}'\n", model_id);
            println!("Name: {}", info.name);
            println!("Repository: {}", info.repo_id);
            println!("Size: {} MB", info.size_mb);
            println!("Dimensions: {}", info.dimensions);
            println!("Description: {}", info.description);
            match manager.get_model_path(&model_id) {
                Some(path) => println!("Status: Downloaded ({})", path.display()),
                None => println!(
                    "Status: Available for download (resume-ranker models download {})",
                    model_id
                ),
            }
        }
    }

    Ok(())
}

fn run_config(action: Option<ConfigAction>, mut config: Config, config_path: PathBuf) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            println!("Current Configuration ({})\n", config_path.display());
            println!("Models Directory: {}", config.models_dir().display());
            println!("Default Embedding Model: {}", config.models.default_embedding_model);
            println!("\nProcessing:");
            println!("  Max text chars: {}", config.processing.max_text_chars);
            println!("  Max concurrency: {}", config.processing.max_concurrency);
            println!("\nScoring Weights:");
            println!("  Semantic: {:.1}%", config.scoring.semantic_weight * 100.0);
            println!("  Skills: {:.1}%", config.scoring.skills_weight * 100.0);
            println!("  Experience: {:.1}%", config.scoring.experience_weight * 100.0);
            println!("  Scale: 0-{}", config.scoring.scale);
            println!("  Experience cap: {} years", config.scoring.experience_cap_years);
            println!("  Min match threshold: {}", config.scoring.min_match_threshold);
            println!("\nOutput:");
            let format = match config.output.format {
                OutputFormat::Console => "console",
                OutputFormat::Json => "json",
                OutputFormat::Markdown => "markdown",
            };
            println!("  Format: {}", format);
            println!("  Detailed: {}", config.output.detailed);
            println!("  Colors: {}", config.output.color_output);
        }

        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
        }

        Some(ConfigAction::Reset) => {
            Config::default().save_to(&config_path)?;
            println!("Configuration reset to defaults at {}", config_path.display());
        }

        Some(ConfigAction::Set { key, value }) => {
            config.set_value(&key, &value)?;
            config.save_to(&config_path)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
