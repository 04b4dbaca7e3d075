//! Weighted aggregation of semantic similarity, skill overlap and experience

use super::normalize::{normalize_experience, normalize_unit, round2, DEFAULT_EXPERIENCE_CAP};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub semantic: f64,
    pub skills: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: 0.55,
            skills: 0.30,
            experience: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.semantic + self.skills + self.experience
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreAggregator {
    pub weights: ScoringWeights,
    pub scale: f64,
    pub experience_cap: f64,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            scale: 10.0,
            experience_cap: DEFAULT_EXPERIENCE_CAP,
        }
    }
}

impl ScoreAggregator {
    pub fn new(weights: ScoringWeights, scale: f64, experience_cap: f64) -> Self {
        Self {
            weights,
            scale,
            experience_cap,
        }
    }

    /// Final match score on the 0-`scale` range.
    ///
    /// `semantic_similarity` and `skill_overlap` are expected on the unit
    /// range and are clamped into it. Weights are applied as given.
    pub fn final_score(
        &self,
        semantic_similarity: f64,
        experience_years: f64,
        skill_overlap: f64,
    ) -> f64 {
        let semantic = normalize_unit(semantic_similarity);
        let skills = normalize_unit(skill_overlap);
        let experience = normalize_experience(experience_years, self.experience_cap);

        let weighted = self.weights.semantic * semantic
            + self.weights.skills * skills
            + self.weights.experience * experience;

        round2(weighted * self.scale)
    }
}

/// Fraction of job skills present in the resume skills.
///
/// Both sets are expected to hold lowercase tokens. Returns exactly 0.0
/// when the job lists no skills.
pub fn skill_overlap(job_skills: &HashSet<String>, resume_skills: &HashSet<String>) -> f64 {
    if job_skills.is_empty() {
        return 0.0;
    }

    let matched = job_skills.intersection(resume_skills).count();
    matched as f64 / job_skills.len() as f64
}
