//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use crate::output::suggest_filename;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description")]
#[command(long_about = "Rank a batch of resumes against one job description using semantic embeddings, skill overlap and experience, with a written rationale per candidate")]
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
    /// Rank resumes against a job description
    Rank(RankArgs),

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct RankArgs {
    /// Job description file (TXT, MD, PDF)
    #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Resume files or directories of resumes
    #[arg(short, long, num_args = 1.., required = true)]
    pub resumes: Vec<PathBuf>,

    /// Show only the best N candidates
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Output format: console, json, markdown
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file; with no path, the name is derived from the job file
    #[arg(short, long, num_args = 0..=1)]
    pub save: Option<Option<PathBuf>>,

    /// Include explanations and extra candidate details
    #[arg(short, long)]
    pub detailed: bool,

    /// Process candidates one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Embedding model to use instead of the configured default
    #[arg(short, long)]
    pub embedding: Option<String>,

    /// Seed for explanation wording, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available embedding models
    List,

    /// Download a model
    Download {
        /// Model id, name or HuggingFace repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Remove a downloaded model
    Remove {
        /// Model id to remove
        model: String,
    },

    /// Show model information
    Info {
        /// Model id
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.semantic_weight")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Where `--save` writes the report; a bare `--save` gets a timestamped
/// name derived from the job source
pub fn resolve_save_path(
    save: &Option<Option<PathBuf>>,
    format: OutputFormat,
    job_source: &str,
) -> Option<PathBuf> {
    save.as_ref().map(|path| match path {
        Some(path) => path.clone(),
        None => PathBuf::from(suggest_filename(format, job_source, true)),
    })
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_command() {
        let cli = Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job",
            "job.txt",
            "--resumes",
            "a.pdf",
            "resumes/",
            "--top",
            "3",
            "--sequential",
        ])
        .unwrap();

        match cli.command {
            Commands::Rank(args) => {
                assert_eq!(args.job, Some(PathBuf::from("job.txt")));
                assert_eq!(args.resumes.len(), 2);
                assert_eq!(args.top, Some(3));
                assert!(args.sequential);
                assert!(!args.detailed);
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_save_path_is_optional() {
        let parse = |extra: &[&str]| {
            let mut argv = vec!["resume-ranker", "rank", "--job", "job.txt", "--resumes", "a.pdf"];
            argv.extend_from_slice(extra);
            match Cli::try_parse_from(argv).unwrap().command {
                Commands::Rank(args) => args.save,
                _ => panic!("expected rank command"),
            }
        };

        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["--save"]), Some(None));
        assert_eq!(
            parse(&["--save", "out/report.md"]),
            Some(Some(PathBuf::from("out/report.md")))
        );
    }

    #[test]
    fn test_job_source_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["resume-ranker", "rank", "--resumes", "a.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job",
            "job.txt",
            "--job-text",
            "Rust developer",
            "--resumes",
            "a.pdf",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "resume-ranker",
            "rank",
            "--job-text",
            "Rust developer",
            "--resumes",
            "a.pdf",
        ])
        .is_ok());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_resolve_save_path() {
        assert_eq!(resolve_save_path(&None, OutputFormat::Json, "job.txt"), None);

        let explicit = Some(Some(PathBuf::from("out.md")));
        assert_eq!(
            resolve_save_path(&explicit, OutputFormat::Json, "job.txt"),
            Some(PathBuf::from("out.md"))
        );

        let derived = resolve_save_path(&Some(None), OutputFormat::Markdown, "jobs/data_analyst.txt")
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(derived.starts_with("data_analyst_ranking_"));
        assert!(derived.ends_with(".md"));
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("job.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("job.docx"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("job"), &["txt"]).is_err());
    }
}
