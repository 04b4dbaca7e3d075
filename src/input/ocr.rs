//! OCR for scanned resumes through the tesseract CLI
//!
//! Images are converted to grayscale, contrast boosted and sharpened before
//! recognition. Scanned PDFs are rasterized page by page with poppler's
//! `pdftoppm` first.

use crate::error::{Result, ResumeRankerError};
use crate::input::text_extractor::FormatExtractor;
use image::DynamicImage;
use log::debug;
use rusty_tesseract::{Args, Image};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::Command;

const PDF_RENDER_DPI: u32 = 300;
const CONTRAST_BOOST: f32 = 40.0;

pub struct OcrExtractor {
    args: Args,
}

impl Default for OcrExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrExtractor {
    pub fn new() -> Self {
        // LSTM engine, one uniform block of text per page
        Self {
            args: Args {
                psm: Some(6),
                oem: Some(3),
                ..Args::default()
            },
        }
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let dir = tempfile::TempDir::new()?;
        let page = dir.path().join("page.png");
        preprocess(image).save(&page).map_err(ocr_error)?;

        let input = Image::from_path(page).map_err(ocr_error)?;
        rusty_tesseract::image_to_string(&input, &self.args).map_err(ocr_error)
    }

    /// Rasterize every page of a PDF and recognize them in page order
    pub fn extract_pdf(&self, path: &Path) -> Result<String> {
        let dir = tempfile::TempDir::new()?;
        let status = Command::new("pdftoppm")
            .arg("-r")
            .arg(PDF_RENDER_DPI.to_string())
            .arg("-png")
            .arg(path)
            .arg(dir.path().join("page"))
            .status()?;
        if !status.success() {
            return Err(ocr_error(format!("pdftoppm failed on '{}': {}", path.display(), status)));
        }

        // pdftoppm zero-pads page numbers, so name order is page order
        let mut pages: Vec<PathBuf> = std::fs::read_dir(dir.path())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        pages.sort();
        debug!("Running OCR on {} pages of {}", pages.len(), path.display());

        let mut text = String::new();
        for page in &pages {
            let image = image::open(page).map_err(ocr_error)?;
            text.push_str(&self.recognize(&image)?);
        }
        Ok(text)
    }
}

impl FormatExtractor for OcrExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let image = image::open(path).map_err(ocr_error)?;
        self.recognize(&image)
    }
}

fn preprocess(image: &DynamicImage) -> DynamicImage {
    image.grayscale().adjust_contrast(CONTRAST_BOOST).unsharpen(1.0, 2)
}

fn ocr_error(err: impl Display) -> ResumeRankerError {
    ResumeRankerError::Ocr(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ColorType;

    #[test]
    fn test_preprocess_yields_grayscale() {
        let image = DynamicImage::new_rgb8(8, 8);
        let prepared = preprocess(&image);
        assert_eq!(prepared.color(), ColorType::L8);
        assert_eq!((prepared.width(), prepared.height()), (8, 8));
    }

    #[test]
    fn test_unreadable_image_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"not really a png").unwrap();

        assert!(OcrExtractor::new().extract(&path).is_err());
    }
}
