//! Embeddings generation using Model2Vec

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use crate::processing::embedding_manager::EmbeddingModelManager;
use anyhow::Context;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

/// Text to fixed-length vector. Implementations never fail: empty input or
/// an internal fault yields a zero vector of [`Embedder::dimension`] length.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;

    fn dimension(&self) -> usize;

    fn zero_vector(&self) -> Vec<f32> {
        vec![0.0; self.dimension()]
    }
}

/// Trim and cut `text` to at most `max_chars` grapheme clusters
pub fn prepare_text(text: &str, max_chars: usize) -> &str {
    let text = text.trim();
    match text.grapheme_indices(true).nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Model2Vec static embedding model, loaded once and shared read-only
pub struct Model2VecEmbedder {
    model: StaticModel,
    dimension: usize,
    max_text_chars: usize,
    model_name: String,
}

impl Model2VecEmbedder {
    pub fn new(model_path: &Path, model_name: &str, max_text_chars: usize) -> Result<Self> {
        let start_time = Instant::now();

        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None,       // token
            Some(true), // normalize
            None,       // subfolder
        )
        .with_context(|| format!("Failed to load model from {}", model_path.display()))
        .map_err(|e| ResumeRankerError::ModelLoading(format!("{:#}", e)))?;

        let dimension = model.encode_single("dimension check").len();
        if dimension == 0 {
            return Err(ResumeRankerError::ModelLoading(format!(
                "Model at {} produced empty embeddings",
                model_path.display()
            )));
        }

        info!(
            "Model {} loaded in {:.2?} ({} dimensions)",
            model_name,
            start_time.elapsed(),
            dimension
        );

        Ok(Self {
            model,
            dimension,
            max_text_chars,
            model_name: model_name.to_string(),
        })
    }

    /// Resolve, download if needed, and load the configured default model
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
        let model_id = manager
            .resolve_model_id(&config.models.default_embedding_model)
            .ok_or_else(|| {
                ResumeRankerError::ModelError(format!(
                    "Unknown embedding model: {}",
                    config.models.default_embedding_model
                ))
            })?;
        let model_path = manager.ensure_model_available(&model_id).await?;
        let max_text_chars = config.processing.max_text_chars;

        tokio::task::spawn_blocking(move || Self::new(&model_path, &model_id, max_text_chars))
            .await
            .map_err(|e| ResumeRankerError::ModelLoading(format!("Model loading task failed: {}", e)))?
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let prepared = prepare_text(text, self.max_text_chars);
        if prepared.is_empty() {
            return self.zero_vector();
        }

        // The tokenizer inside the model panics on failure instead of returning an error
        match panic::catch_unwind(AssertUnwindSafe(|| self.model.encode_single(prepared))) {
            Ok(embedding) if embedding.len() == self.dimension => embedding,
            Ok(embedding) => {
                warn!(
                    "Embedding has {} dimensions, expected {}; using zero vector",
                    embedding.len(),
                    self.dimension
                );
                self.zero_vector()
            }
            Err(_) => {
                warn!("Embedding model failed; using zero vector");
                self.zero_vector()
            }
        }
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
