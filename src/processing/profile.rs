//! Structured candidate facts: skills, education, experience and domain

use crate::scoring::normalize::round2;
use aho_corasick::AhoCorasick;
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use unicode_segmentation::UnicodeSegmentation;

pub const UNKNOWN: &str = "Unknown";

const SKILL_KEYWORDS: &[&str] = &[
    "python", "java", "c++", "c", "sql", "r", "javascript",
    "data science", "machine learning", "deep learning",
    "nlp", "computer vision", "statistics", "data analytics",
    "pandas", "numpy", "scikit-learn", "tensorflow",
    "pytorch", "keras", "opencv", "matplotlib", "seaborn",
    "excel", "power bi", "tableau",
    "aws", "azure", "gcp", "docker", "kubernetes", "git",
];

const SKILL_ALIASES: &[(&str, &str)] = &[
    ("ml", "machine learning"),
    ("dl", "deep learning"),
    ("natural language processing", "nlp"),
    ("cv", "computer vision"),
    ("sklearn", "scikit-learn"),
];

/// Label, rank and the phrases that indicate it
const EDUCATION_LEVELS: &[(&str, u8, &[&str])] = &[
    ("SECONDARY (10TH)", 1, &["10th", "ssc", "secondary school", "matriculation"]),
    ("HIGHER SECONDARY (12TH)", 2, &["12th", "hsc", "higher secondary", "intermediate"]),
    ("DIPLOMA", 3, &["diploma"]),
    (
        "BACHELOR",
        4,
        &[
            "b.tech", "b.e", "b.sc", "bca",
            "bachelor of technology", "bachelor of engineering",
            "bachelor degree", "undergraduate",
        ],
    ),
    (
        "MASTER",
        5,
        &[
            "m.tech", "m.sc", "mba", "mca",
            "master of technology", "master degree", "postgraduate",
        ],
    ),
    ("PHD", 6, &["phd", "doctor of philosophy", "doctoral"]),
];

const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certified", "certification", "coursera", "udemy", "aws certified", "google certified",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Title-cased, sorted, original order from the extractor is kept downstream
    pub skills: Vec<String>,
    pub education: String,
    pub experience_years: f64,
    pub experience_level: String,
    pub domain: String,
    pub certifications: Vec<String>,
    pub project_count: usize,
}

impl Default for CandidateProfile {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            education: UNKNOWN.to_string(),
            experience_years: 0.0,
            experience_level: experience_level(0.0).to_string(),
            domain: UNKNOWN.to_string(),
            certifications: Vec::new(),
            project_count: 0,
        }
    }
}

pub trait ProfileExtractor: Send + Sync {
    fn extract_profile(&self, text: &str) -> CandidateProfile;
}

/// Case-insensitive whole-term matcher over a fixed vocabulary
struct TermMatcher {
    automaton: AhoCorasick,
    terms: Vec<String>,
}

impl TermMatcher {
    fn new(terms: Vec<String>) -> Self {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&terms)
            .expect("Invalid term vocabulary");
        Self { automaton, terms }
    }

    /// Indices of terms that occur on term boundaries in `text`
    fn matched(&self, text: &str) -> BTreeSet<usize> {
        let bytes = text.as_bytes();
        self.automaton
            .find_overlapping_iter(text)
            .filter(|m| {
                let before = m.start().checked_sub(1).map(|i| bytes[i]);
                let after = bytes.get(m.end()).copied();
                !before.map_or(false, is_term_byte) && !after.map_or(false, is_term_byte)
            })
            .map(|m| m.pattern().as_usize())
            .collect()
    }

    fn term(&self, index: usize) -> &str {
        &self.terms[index]
    }
}

fn is_term_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'#' || b == b'_'
}

/// Rule-based extractor over a fixed skill taxonomy
pub struct TaxonomyProfileExtractor {
    skill_matcher: TermMatcher,
    /// Canonical skill for every term in `skill_matcher`
    skill_canonical: Vec<&'static str>,
    education_matcher: TermMatcher,
    /// Education level index for every term in `education_matcher`
    education_level: Vec<usize>,
    years_regex: Regex,
    date_range_regex: Regex,
    project_regex: Regex,
    current_year: i32,
}

impl Default for TaxonomyProfileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TaxonomyProfileExtractor {
    pub fn new() -> Self {
        let mut skill_terms = Vec::new();
        let mut skill_canonical = Vec::new();
        for skill in SKILL_KEYWORDS {
            skill_terms.push(skill.to_string());
            skill_canonical.push(*skill);
        }
        for (alias, canonical) in SKILL_ALIASES {
            skill_terms.push(alias.to_string());
            skill_canonical.push(*canonical);
        }

        let mut education_terms = Vec::new();
        let mut education_level = Vec::new();
        for (index, (_, _, phrases)) in EDUCATION_LEVELS.iter().enumerate() {
            for phrase in phrases.iter() {
                education_terms.push(phrase.to_string());
                education_level.push(index);
            }
        }

        let years_regex =
            Regex::new(r"(?i)(\d+(?:\.\d+)?)\+?\s*(?:years|yrs)").expect("Invalid years regex");
        let date_range_regex =
            Regex::new(r"(?i)(19\d{2}|20\d{2})\s*(?:-|to|–)\s*(present|19\d{2}|20\d{2})")
                .expect("Invalid date range regex");
        let project_regex = Regex::new(r"(?i)\bprojects?\b").expect("Invalid project regex");

        Self {
            skill_matcher: TermMatcher::new(skill_terms),
            skill_canonical,
            education_matcher: TermMatcher::new(education_terms),
            education_level,
            years_regex,
            date_range_regex,
            project_regex,
            current_year: chrono::Local::now().year(),
        }
    }

    /// Pin the year used to close "present" date ranges
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let canonical: BTreeSet<&str> = self
            .skill_matcher
            .matched(text)
            .into_iter()
            .map(|index| self.skill_canonical[index])
            .collect();

        let mut skills: Vec<String> = canonical.into_iter().map(title_case).collect();
        skills.sort();
        skills
    }

    pub fn extract_education(&self, text: &str) -> String {
        self.education_matcher
            .matched(text)
            .into_iter()
            .map(|index| &EDUCATION_LEVELS[self.education_level[index]])
            .max_by_key(|(_, rank, _)| *rank)
            .map(|(label, _, _)| label.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Largest explicit "N years" mention, else the longest date range
    pub fn extract_experience_years(&self, text: &str) -> f64 {
        let stated = self
            .years_regex
            .captures_iter(text)
            .filter_map(|caps| caps[1].parse::<f64>().ok())
            .fold(None, |acc: Option<f64>, years| {
                Some(acc.map_or(years, |best| best.max(years)))
            });

        if let Some(years) = stated {
            return round2(years);
        }

        self.date_range_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let start: i32 = caps[1].parse().ok()?;
                let end: i32 = if caps[2].eq_ignore_ascii_case("present") {
                    self.current_year
                } else {
                    caps[2].parse().ok()?
                };
                (end >= start).then(|| f64::from(end - start))
            })
            .fold(0.0, f64::max)
    }

    pub fn extract_certifications(&self, text: &str) -> Vec<String> {
        let segments: Vec<&str> = if text.lines().nth(1).is_some() {
            text.lines().collect()
        } else {
            text.unicode_sentences().collect()
        };

        segments
            .into_iter()
            .map(str::trim)
            .filter(|segment| {
                let lower = segment.to_lowercase();
                CERTIFICATION_KEYWORDS.iter().any(|k| lower.contains(k))
            })
            .map(str::to_string)
            .collect()
    }

    pub fn count_projects(&self, text: &str) -> usize {
        self.project_regex.find_iter(text).count()
    }
}

impl ProfileExtractor for TaxonomyProfileExtractor {
    fn extract_profile(&self, text: &str) -> CandidateProfile {
        if text.trim().is_empty() {
            return CandidateProfile::default();
        }

        let skills = self.extract_skills(text);
        let experience_years = self.extract_experience_years(text);
        let domain = infer_domain(&skills).to_string();

        CandidateProfile {
            education: self.extract_education(text),
            experience_level: experience_level(experience_years).to_string(),
            certifications: self.extract_certifications(text),
            project_count: self.count_projects(text),
            skills,
            experience_years,
            domain,
        }
    }
}

pub fn experience_level(years: f64) -> &'static str {
    if years <= 1.0 {
        "Fresher"
    } else if years <= 3.0 {
        "Junior"
    } else if years <= 6.0 {
        "Mid-Level"
    } else {
        "Senior"
    }
}

pub fn infer_domain(skills: &[String]) -> &'static str {
    let has_any = |wanted: &[&str]| {
        skills
            .iter()
            .any(|s| wanted.iter().any(|w| s.eq_ignore_ascii_case(w)))
    };

    if has_any(&["machine learning", "deep learning", "nlp"]) {
        "Data Science / AI"
    } else if has_any(&["sql", "excel", "power bi"]) {
        "Data Analytics"
    } else if has_any(&["aws", "docker", "kubernetes"]) {
        "Cloud / DevOps"
    } else if has_any(&["java", "c++", "javascript"]) {
        "Software Development"
    } else {
        "General"
    }
}

/// Capitalize the first letter of every alphabetic run
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
