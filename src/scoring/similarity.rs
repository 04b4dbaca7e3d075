//! Semantic similarity between two embedding vectors
//!
//! Raw cosine similarity is rescaled from [-1, 1] to [0, 1], gated by a
//! minimum match threshold and then bent through three bands so that
//! confident matches are rewarded and marginal ones suppressed. The result
//! lives on a 0-`scale` range, or is an explicit [`SimilarityOutcome::NoMatch`]
//! when the two vectors are not comparable at all.

use super::normalize::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Norms below this are treated as zero vectors
pub const MIN_VECTOR_NORM: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoMatchReason {
    /// One of the vectors has no components
    Empty,
    DimensionMismatch,
    /// Zero (or near zero) vector, no meaningful direction
    DegenerateVector,
    BelowThreshold,
    NumericFault,
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            NoMatchReason::Empty => "empty embedding",
            NoMatchReason::DimensionMismatch => "embedding dimensions differ",
            NoMatchReason::DegenerateVector => "zero-norm embedding",
            NoMatchReason::BelowThreshold => "similarity below match threshold",
            NoMatchReason::NumericFault => "non-finite similarity",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimilarityOutcome {
    /// Adjusted similarity on the 0-`scale` range
    Score(f64),
    NoMatch(NoMatchReason),
}

impl SimilarityOutcome {
    pub fn score(&self) -> Option<f64> {
        match self {
            SimilarityOutcome::Score(score) => Some(*score),
            SimilarityOutcome::NoMatch(_) => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, SimilarityOutcome::Score(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    pub scale: f64,
    pub min_match_threshold: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            scale: 10.0,
            min_match_threshold: 0.25,
        }
    }
}

impl SimilarityScorer {
    pub fn new(scale: f64, min_match_threshold: f64) -> Self {
        Self {
            scale,
            min_match_threshold,
        }
    }

    pub fn similarity(&self, a: &[f32], b: &[f32]) -> SimilarityOutcome {
        if a.is_empty() || b.is_empty() {
            return SimilarityOutcome::NoMatch(NoMatchReason::Empty);
        }
        if a.len() != b.len() {
            return SimilarityOutcome::NoMatch(NoMatchReason::DimensionMismatch);
        }

        let norm_a = l2_norm(a);
        let norm_b = l2_norm(b);
        if !norm_a.is_finite() || !norm_b.is_finite() {
            return SimilarityOutcome::NoMatch(NoMatchReason::NumericFault);
        }
        if norm_a < MIN_VECTOR_NORM || norm_b < MIN_VECTOR_NORM {
            return SimilarityOutcome::NoMatch(NoMatchReason::DegenerateVector);
        }

        let dot: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| f64::from(*x) * f64::from(*y))
            .sum();
        let raw = dot / (norm_a * norm_b);
        if !raw.is_finite() {
            return SimilarityOutcome::NoMatch(NoMatchReason::NumericFault);
        }

        // [-1, 1] -> [0, 1]
        let rescaled = (raw.clamp(-1.0, 1.0) + 1.0) / 2.0;
        if rescaled < self.min_match_threshold {
            return SimilarityOutcome::NoMatch(NoMatchReason::BelowThreshold);
        }

        let score = round2(adjust_band(rescaled) * self.scale);
        if !score.is_finite() {
            return SimilarityOutcome::NoMatch(NoMatchReason::NumericFault);
        }

        SimilarityOutcome::Score(score)
    }
}

/// Non-linear ATS-style adjustment of a rescaled similarity
pub fn adjust_band(rescaled: f64) -> f64 {
    if rescaled < 0.4 {
        rescaled * 0.7
    } else if rescaled < 0.65 {
        rescaled * 0.9
    } else {
        (rescaled * 1.1).min(1.0)
    }
}

fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt()
}
