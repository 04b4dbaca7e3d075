//! Natural-language justification of a candidate's score
//!
//! The structure of an explanation is fixed; only the wording inside each
//! part is drawn from a phrase bank keyed by the score band. The random
//! source is passed in so callers can pin it.

pub mod bands;
pub mod generator;
mod phrases;

pub use bands::{ExperienceBand, MatchQuality, OverlapLevel, Recommendation, SemanticFit};
pub use generator::{brief_summary, ExplanationGenerator, ExplanationSignals};
