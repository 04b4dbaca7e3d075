//! Candidate signal extraction: cleaning, contacts, profile facts and embeddings

pub mod contact;
pub mod embedding_manager;
pub mod embeddings;
pub mod profile;
pub mod text_cleaner;

pub use contact::{ContactExtractor, ContactInfo, RegexContactExtractor};
pub use embeddings::{Embedder, Model2VecEmbedder};
pub use profile::{CandidateProfile, ProfileExtractor, TaxonomyProfileExtractor};
pub use text_cleaner::{ResumeTextCleaner, TextCleaner};
