//! Report structure handed to the formatters

use crate::ranking::{MatchResult, RankingRun, SkippedCandidate};
use crate::scoring::ScoringWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished ranking run plus the context needed to present it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub metadata: ReportMetadata,
    /// Highest score first
    pub results: Vec<MatchResult>,
    pub skipped: Vec<SkippedCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub ranker_version: String,
    /// Job description file, or "inline" when passed as text
    pub job_source: String,
    pub embedding_model: String,
    pub weights: ScoringWeights,
    /// Upper end of the score range
    pub scale: f64,
    pub candidates_total: usize,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(
        job_source: impl Into<String>,
        embedding_model: impl Into<String>,
        weights: ScoringWeights,
        scale: f64,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            ranker_version: env!("CARGO_PKG_VERSION").to_string(),
            job_source: job_source.into(),
            embedding_model: embedding_model.into(),
            weights,
            scale,
            candidates_total: 0,
            processing_time_ms: 0,
        }
    }

    pub fn with_processing_time(mut self, processing_time_ms: u64) -> Self {
        self.processing_time_ms = processing_time_ms;
        self
    }
}

impl RankingReport {
    pub fn new(run: RankingRun, mut metadata: ReportMetadata) -> Self {
        metadata.candidates_total = run.candidate_count();
        Self {
            metadata,
            results: run.results,
            skipped: run.skipped,
        }
    }

    /// Keep only the best `n` results
    pub fn truncate(&mut self, n: usize) {
        self.results.truncate(n);
    }

    /// Match score of `result` on the unit range
    pub fn unit_score(&self, result: &MatchResult) -> f64 {
        if self.metadata.scale > 0.0 {
            (result.match_score / self.metadata.scale).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
