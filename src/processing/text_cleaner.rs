//! Text cleaning and normalization for extracted resume text

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Turns raw extracted text into the normalized form used for embedding
/// and extraction. Must be deterministic; empty output means "nothing left".
pub trait TextCleaner: Send + Sync {
    fn clean(&self, raw: &str) -> String;
}

/// Cleaner tuned for PDF and OCR output
pub struct ResumeTextCleaner {
    bullet_regex: Regex,
    broken_word_regex: Regex,
    page_number_regex: Regex,
    punctuation_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for ResumeTextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeTextCleaner {
    pub fn new() -> Self {
        let bullet_regex = Regex::new(r"[•●▪■◆►◦▸➤\u{FE0F}]+").expect("Invalid bullet regex");

        let broken_word_regex =
            Regex::new(r"\b([a-zA-Z])\s+([a-zA-Z])\b").expect("Invalid broken word regex");

        let page_number_regex = Regex::new(r"(?i)\bpage\s*\d+\b").expect("Invalid page regex");

        let punctuation_regex = Regex::new(r"[^\w\s@.+,/:-]").expect("Invalid punctuation regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            bullet_regex,
            broken_word_regex,
            page_number_regex,
            punctuation_regex,
            whitespace_regex,
        }
    }

    pub fn clean_text(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let mut cleaned = self.normalize_unicode(text);

        cleaned = self.bullet_regex.replace_all(&cleaned, " ").into_owned();

        // "d a t a" style OCR spacing
        cleaned = self
            .broken_word_regex
            .replace_all(&cleaned, "${1}${2}")
            .into_owned();

        cleaned = self.page_number_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.punctuation_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.whitespace_regex.replace_all(&cleaned, " ").into_owned();

        cleaned.to_lowercase().trim().to_string()
    }

    /// NFKD, then fold the dashes NFKD leaves alone
    fn normalize_unicode(&self, text: &str) -> String {
        text.nfkd()
            .map(|c| match c {
                '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
                _ => c,
            })
            .collect()
    }
}

impl TextCleaner for ResumeTextCleaner {
    fn clean(&self, raw: &str) -> String {
        self.clean_text(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let cleaner = ResumeTextCleaner::new();
        assert_eq!(cleaner.clean_text(""), "");
        assert_eq!(cleaner.clean_text("   \n\t "), "");
        assert_eq!(cleaner.clean_text("•••"), "");
    }

    #[test]
    fn test_lowercases_and_collapses_whitespace() {
        let cleaner = ResumeTextCleaner::new();
        let cleaned = cleaner.clean_text("  Senior   Python\n\nDeveloper  ");
        assert_eq!(cleaned, "senior python developer");
    }

    #[test]
    fn test_keeps_contact_punctuation() {
        let cleaner = ResumeTextCleaner::new();
        let cleaned = cleaner.clean_text("Email: Jane.Doe+cv@mail.com | Phone: +1 555-123-4567");
        assert!(cleaned.contains("jane.doe+cv@mail.com"));
        assert!(cleaned.contains("+1 555-123-4567"));
        assert!(!cleaned.contains('|'));
    }

    #[test]
    fn test_removes_bullets_and_page_numbers() {
        let cleaner = ResumeTextCleaner::new();
        let cleaned = cleaner.clean_text("• Built APIs\n● Led team\nPage 2");
        assert_eq!(cleaned, "built apis led team");
    }

    #[test]
    fn test_repairs_spaced_letters() {
        let cleaner = ResumeTextCleaner::new();
        assert_eq!(cleaner.clean_text("A I engineer"), "ai engineer");
    }

    #[test]
    fn test_folds_typographic_characters() {
        let cleaner = ResumeTextCleaner::new();
        let cleaned = cleaner.clean_text("2018\u{2013}2021 \u{FB01}nance");
        assert_eq!(cleaned, "2018-2021 finance");
    }

    #[test]
    fn test_folds_compatibility_characters() {
        let cleaner = ResumeTextCleaner::new();
        assert_eq!(cleaner.clean_text("Ｐｙｔｈｏｎ ＳＱＬ"), "python sql");
        assert_eq!(
            cleaner.clean_text("Ｐｙｔｈｏｎ ＳＱＬ Ｅｘｃｅｌ\u{00A0}\u{2026}"),
            "python sql excel ..."
        );
    }
}
