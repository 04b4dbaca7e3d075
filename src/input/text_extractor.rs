//! Text extraction from various file formats

use crate::error::{Result, ResumeRankerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::fs;
use std::panic;
use std::path::Path;

/// A PDF text layer this short or shorter is treated as a scan
pub const MIN_PDF_TEXT_CHARS: usize = 200;

/// Raw text of one resume file.
///
/// An empty string means the file holds no extractable text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Extraction for a single file format
pub trait FormatExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl FormatExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;

        // pdf-extract panics on some malformed documents
        let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| {
                ResumeRankerError::PdfExtraction(format!(
                    "PDF parser crashed on '{}'",
                    path.display()
                ))
            })?;

        extracted.map_err(|e| {
            ResumeRankerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Whether extracted PDF text is too thin to be the real document
pub fn needs_ocr_fallback(pdf_text: &str) -> bool {
    pdf_text.trim().chars().count() <= MIN_PDF_TEXT_CHARS
}

pub struct PlainTextExtractor;

impl FormatExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct MarkdownExtractor;

impl FormatExtractor for MarkdownExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        Ok(MarkdownExtractor::markdown_to_text(&String::from_utf8_lossy(&bytes)))
    }
}

impl MarkdownExtractor {
    /// Plain text of a markdown document, one block per line
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
