//! Input handling: file type detection, text extraction and resume discovery

pub mod file_detector;
pub mod manager;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod text_extractor;

pub use manager::{collect_resume_paths, DocumentTextExtractor};
pub use text_extractor::TextExtractor;
