//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use crate::scoring::aggregator::ScoringWeights;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub processing: ProcessingConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub default_embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Character budget applied to text before it is embedded
    pub max_text_chars: usize,
    /// Upper bound on candidates processed at the same time
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub semantic_weight: f64,
    pub skills_weight: f64,
    pub experience_weight: f64,
    pub scale: f64,
    pub experience_cap_years: f64,
    pub min_match_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-ranker")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                default_embedding_model: "potion-base-8M".to_string(),
            },
            processing: ProcessingConfig {
                max_text_chars: 5000,
                max_concurrency: 4,
            },
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        Self {
            semantic_weight: weights.semantic,
            skills_weight: weights.skills,
            experience_weight: weights.experience,
            scale: 10.0,
            experience_cap_years: 10.0,
            min_match_threshold: 0.25,
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            semantic: self.semantic_weight,
            skills: self.skills_weight,
            experience: self.experience_weight,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit file; the file must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeRankerError::Configuration(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    /// Reject settings the scoring engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let weights = scoring.weights();

        if [weights.semantic, weights.skills, weights.experience]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ResumeRankerError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }

        if (weights.sum() - 1.0).abs() > 1e-6 {
            warn!(
                "Scoring weights sum to {:.3}; match scores may leave the 0-{} range",
                weights.sum(),
                scoring.scale
            );
        }

        if !(scoring.scale.is_finite() && scoring.scale > 0.0) {
            return Err(ResumeRankerError::Configuration(
                "scoring.scale must be positive".to_string(),
            ));
        }

        if !(scoring.experience_cap_years.is_finite() && scoring.experience_cap_years > 0.0) {
            return Err(ResumeRankerError::Configuration(
                "scoring.experience_cap_years must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&scoring.min_match_threshold) {
            return Err(ResumeRankerError::Configuration(
                "scoring.min_match_threshold must be within [0, 1]".to_string(),
            ));
        }

        if self.processing.max_concurrency == 0 {
            return Err(ResumeRankerError::Configuration(
                "processing.max_concurrency must be at least 1".to_string(),
            ));
        }

        if self.processing.max_text_chars == 0 {
            return Err(ResumeRankerError::Configuration(
                "processing.max_text_chars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Set a single value addressed as `section.key`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value.parse::<T>().map_err(|_| {
                ResumeRankerError::Configuration(format!("Invalid value for {}: {}", key, value))
            })
        }

        match key {
            "models.models_dir" => self.models.models_dir = PathBuf::from(value),
            "models.default_embedding_model" => {
                self.models.default_embedding_model = value.to_string()
            }
            "processing.max_text_chars" => self.processing.max_text_chars = parse(key, value)?,
            "processing.max_concurrency" => self.processing.max_concurrency = parse(key, value)?,
            "scoring.semantic_weight" => self.scoring.semantic_weight = parse(key, value)?,
            "scoring.skills_weight" => self.scoring.skills_weight = parse(key, value)?,
            "scoring.experience_weight" => self.scoring.experience_weight = parse(key, value)?,
            "scoring.scale" => self.scoring.scale = parse(key, value)?,
            "scoring.experience_cap_years" => {
                self.scoring.experience_cap_years = parse(key, value)?
            }
            "scoring.min_match_threshold" => self.scoring.min_match_threshold = parse(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeRankerError::Configuration)?
            }
            "output.detailed" => self.output.detailed = parse(key, value)?,
            "output.color_output" => self.output.color_output = parse(key, value)?,
            _ => {
                return Err(ResumeRankerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }

        self.validate()
    }
}
