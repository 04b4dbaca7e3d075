//! Embedding model management: catalog, download and local discovery

use crate::error::{Result, ResumeRankerError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec model directory must contain
const REQUIRED_MODEL_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];

const OPTIONAL_MODEL_FILES: [&str; 1] = ["README.md"];

/// Preference order when nothing is configured
const PREFERRED_MODELS: [&str; 3] = ["potion-base-8M", "m2v-base", "m2v-large"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
    api: Api,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeRankerError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let api = Api::new().map_err(|e| {
            ResumeRankerError::ModelError(format!("Failed to initialize HF API: {}", e))
        })?;

        let mut manager = Self {
            models_dir,
            available_models: Self::catalog(),
            downloaded_models: HashSet::new(),
            api,
        };

        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    fn catalog() -> BTreeMap<String, EmbeddingModelInfo> {
        let entries = [
            (
                "potion-base-8M",
                "Potion Base 8M",
                "minishlab/potion-base-8M",
                33,
                256,
                "Compact general-purpose Model2Vec embeddings (recommended)",
            ),
            (
                "m2v-base",
                "Model2Vec Base",
                "minishlab/M2V_base_output",
                90,
                256,
                "Model2Vec base embeddings distilled from bge-base",
            ),
            (
                "m2v-large",
                "Model2Vec Large",
                "minishlab/M2V_large_output",
                250,
                512,
                "Higher capacity Model2Vec embeddings",
            ),
        ];

        entries
            .into_iter()
            .map(|(id, name, repo_id, size_mb, dimensions, description)| {
                (
                    id.to_string(),
                    EmbeddingModelInfo {
                        name: name.to_string(),
                        repo_id: repo_id.to_string(),
                        size_mb,
                        description: description.to_string(),
                        dimensions,
                    },
                )
            })
            .collect()
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            ResumeRankerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && Self::is_model_directory(&entry.path()).await {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    async fn is_model_directory(path: &Path) -> bool {
        for file in REQUIRED_MODEL_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self.available_models.get(model_id).cloned().ok_or_else(|| {
            ResumeRankerError::ModelError(format!("Unknown embedding model: {}", model_id))
        })?;

        let model_dir = self.models_dir.join(model_id);
        if self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            ResumeRankerError::ModelError(format!("Failed to create model directory: {}", e))
        })?;

        let repo = self.api.model(model_info.repo_id.clone());

        for file in REQUIRED_MODEL_FILES.iter().chain(OPTIONAL_MODEL_FILES.iter()) {
            match repo.get(file).await {
                Ok(cached_path) => {
                    fs::copy(&cached_path, model_dir.join(file)).await.map_err(|e| {
                        ResumeRankerError::ModelError(format!("Failed to copy {}: {}", file, e))
                    })?;
                    info!("Downloaded {}", file);
                }
                Err(e) if OPTIONAL_MODEL_FILES.contains(file) => {
                    warn!("Optional file {} not available: {}", file, e);
                }
                Err(e) => {
                    return Err(ResumeRankerError::ModelError(format!(
                        "Failed to download required file {}: {}",
                        file, e
                    )));
                }
            }
        }

        self.downloaded_models.insert(model_id.to_string());
        info!("Embedding model {} is ready", model_info.name);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        self.downloaded_models
            .contains(model_id)
            .then(|| self.models_dir.join(model_id))
    }

    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        match self.get_model_path(model_id) {
            Some(path) => Ok(path),
            None => self.download_model(model_id).await,
        }
    }

    pub async fn remove_model(&mut self, model_id: &str) -> Result<()> {
        if !self.downloaded_models.remove(model_id) {
            return Err(ResumeRankerError::ModelError(format!(
                "Model is not downloaded: {}",
                model_id
            )));
        }
        fs::remove_dir_all(self.models_dir.join(model_id)).await?;
        Ok(())
    }

    /// Catalog entries ordered by id
    pub fn list_available_models(&self) -> Vec<(&String, &EmbeddingModelInfo)> {
        self.available_models.iter().collect()
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    /// First downloaded model in preference order, else the recommended one
    pub fn auto_select_model(&self) -> String {
        PREFERRED_MODELS
            .iter()
            .find(|id| self.downloaded_models.contains(**id))
            .unwrap_or(&PREFERRED_MODELS[0])
            .to_string()
    }

    /// Accepts a catalog id, a repo id, a display name, or the name of a
    /// model directory already present on disk
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) || self.downloaded_models.contains(input) {
            return Some(input.to_string());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .iter()
            .find(|(_, info)| info.repo_id == input || info.name.to_lowercase() == input_lower)
            .map(|(id, _)| id.clone())
    }
}
