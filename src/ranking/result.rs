//! Records produced by a ranking run

use crate::scoring::similarity::NoMatchReason;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One scored candidate. Built once per surviving resume and never changed
/// after it is placed in the result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub source: PathBuf,
    pub email: String,
    pub phone_numbers: Vec<String>,
    pub skills: Vec<String>,
    pub education: String,
    pub experience_years: f64,
    pub experience_level: String,
    pub domain: String,
    pub certifications: Vec<String>,
    pub project_count: usize,
    /// Adjusted similarity on the 0-scale range
    pub semantic_similarity: f64,
    /// Fraction of job skills found in the resume
    pub skill_overlap: f64,
    /// Weighted score on the 0-scale range
    pub match_score: f64,
    pub explanation: String,
    pub summary: String,
}

/// Why a candidate produced no [`MatchResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Skipped {
    NoText,
    EmptyAfterCleaning,
    NoSemanticMatch(NoMatchReason),
    Failed(String),
}

impl Skipped {
    /// Failures are worth a warning; the other reasons are expected outcomes
    pub fn is_failure(&self) -> bool {
        matches!(self, Skipped::Failed(_))
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skipped::NoText => write!(f, "no extractable text"),
            Skipped::EmptyAfterCleaning => write!(f, "no text left after cleaning"),
            Skipped::NoSemanticMatch(reason) => write!(f, "no semantic match ({})", reason),
            Skipped::Failed(error) => write!(f, "processing failed: {}", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub source: PathBuf,
    pub reason: Skipped,
}

/// Ranked results plus every candidate that was dropped, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingRun {
    pub results: Vec<MatchResult>,
    pub skipped: Vec<SkippedCandidate>,
}

impl RankingRun {
    pub fn candidate_count(&self) -> usize {
        self.results.len() + self.skipped.len()
    }
}
