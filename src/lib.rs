//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod explanation;
pub mod input;
pub mod output;
pub mod processing;
pub mod ranking;
pub mod scoring;

pub use config::{Config, OutputFormat};
pub use error::{Result, ResumeRankerError};
pub use ranking::{MatchResult, RankingPipeline, RankingRun};
