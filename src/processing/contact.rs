//! Contact detail extraction (email and phone numbers)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder used when no email address is present
pub const EMAIL_NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub primary_email: String,
    pub phone_numbers: Vec<String>,
}

pub trait ContactExtractor: Send + Sync {
    fn extract_contacts(&self, text: &str) -> ContactInfo;
}

pub struct RegexContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    phone_strip_regex: Regex,
}

impl Default for RegexContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
            .expect("Invalid email regex");

        let phone_regex =
            Regex::new(r"(?:\+?\d{1,3}[\s-]?)?(?:\(?\d{3}\)?[\s-]?)?\d{3}[\s-]?\d{4}")
                .expect("Invalid phone regex");

        let phone_strip_regex = Regex::new(r"[^\d+]").expect("Invalid phone strip regex");

        Self {
            email_regex,
            phone_regex,
            phone_strip_regex,
        }
    }

    /// Distinct email addresses in document order
    pub fn extract_emails(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.email_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|email| seen.insert(email.clone()))
            .collect()
    }

    pub fn extract_primary_email(&self, text: &str) -> String {
        self.extract_emails(text)
            .into_iter()
            .next()
            .unwrap_or_else(|| EMAIL_NOT_FOUND.to_string())
    }

    /// Distinct phone numbers reduced to digits and `+`, at least ten long
    pub fn extract_phone_numbers(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.phone_regex
            .find_iter(text)
            .map(|m| self.phone_strip_regex.replace_all(m.as_str(), "").into_owned())
            .filter(|phone| phone.len() >= 10)
            .filter(|phone| seen.insert(phone.clone()))
            .collect()
    }
}

impl ContactExtractor for RegexContactExtractor {
    fn extract_contacts(&self, text: &str) -> ContactInfo {
        ContactInfo {
            primary_email: self.extract_primary_email(text),
            phone_numbers: self.extract_phone_numbers(text),
        }
    }
}
