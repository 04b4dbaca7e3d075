//! Routing of resume files to the right extractor, and resume discovery

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
#[cfg(feature = "ocr")]
use crate::input::ocr::OcrExtractor;
use crate::input::text_extractor::{
    needs_ocr_fallback, FormatExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor,
    TextExtractor,
};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Default [`TextExtractor`] for PDF, plain text, markdown and image resumes.
///
/// Never fails: missing files, unsupported formats and files that cannot be
/// read or parsed all yield an empty string with a warning, so the
/// candidate is skipped for lack of text. Images, and PDFs whose text layer
/// is too thin, go through OCR when the `ocr` feature is enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pdf(&self, path: &Path) -> Result<String> {
        debug!("Extracting text from PDF: {}", path.display());
        let text = PdfExtractor.extract(path)?;
        if !needs_ocr_fallback(&text) {
            return Ok(text);
        }
        self.ocr_pdf(path, text)
    }

    #[cfg(feature = "ocr")]
    fn ocr_pdf(&self, path: &Path, mut text: String) -> Result<String> {
        debug!("PDF text layer is thin, falling back to OCR: {}", path.display());
        text.push_str(&OcrExtractor::new().extract_pdf(path)?);
        Ok(text)
    }

    #[cfg(not(feature = "ocr"))]
    fn ocr_pdf(&self, path: &Path, text: String) -> Result<String> {
        debug!("PDF text layer is thin and OCR is disabled: {}", path.display());
        Ok(text)
    }

    #[cfg(feature = "ocr")]
    fn extract_image(&self, path: &Path) -> Result<String> {
        debug!("Running OCR on image: {}", path.display());
        OcrExtractor::new().extract(path)
    }

    #[cfg(not(feature = "ocr"))]
    fn extract_image(&self, path: &Path) -> Result<String> {
        warn!("OCR is disabled, no text from image resume: {}", path.display());
        Ok(String::new())
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.is_file() {
            warn!("Resume file does not exist: {}", path.display());
            return Ok(String::new());
        }

        let extracted = match FileType::from_path(path) {
            FileType::Pdf => self.extract_pdf(path),
            FileType::Text => {
                debug!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path)
            }
            FileType::Markdown => {
                debug!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path)
            }
            FileType::Image => self.extract_image(path),
            FileType::Unknown => {
                warn!("Unsupported resume format: {}", path.display());
                Ok(String::new())
            }
        };

        Ok(extracted.unwrap_or_else(|e| {
            warn!("No text extracted from {}: {}", path.display(), e);
            String::new()
        }))
    }
}

/// Expand files and directories into the list of resume files to rank.
///
/// Files are kept in the given order; each directory contributes its
/// supported files (non-recursive) sorted by name.
pub fn collect_resume_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && FileType::from_path(path).is_resume_format())
                .collect();
            found.sort();
            debug!("Found {} resumes in {}", found.len(), input.display());
            paths.extend(found);
        } else if input.exists() {
            paths.push(input.clone());
        } else {
            return Err(ResumeRankerError::InvalidInput(format!(
                "Resume path does not exist: {}",
                input.display()
            )));
        }
    }

    Ok(paths)
}
