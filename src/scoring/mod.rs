//! Scoring engine: normalization, semantic similarity and weighted aggregation

pub mod aggregator;
pub mod normalize;
pub mod similarity;

pub use aggregator::{skill_overlap, ScoreAggregator, ScoringWeights};
pub use normalize::{normalize_experience, normalize_unit, round2};
pub use similarity::{NoMatchReason, SimilarityOutcome, SimilarityScorer};
