//! Batch ranking of resumes against one job description

pub mod orchestrator;
pub mod result;

pub use orchestrator::{JobQuery, RankingPipeline};
pub use result::{MatchResult, RankingRun, Skipped, SkippedCandidate};
