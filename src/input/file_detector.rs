//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    /// Scanned resumes; accepted as input but need OCR to yield text
    Image,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "png" | "jpg" | "jpeg" => FileType::Image,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Whether a file of this type is accepted as a resume
    pub fn is_resume_format(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("scan.jpeg")), FileType::Image);
        assert_eq!(FileType::from_path(Path::new("notes")), FileType::Unknown);
        assert!(!FileType::from_path(Path::new("cv.docx")).is_resume_format());
    }
}
