//! Natural-language rationale for a ranked candidate

use super::bands::{ExperienceBand, MatchQuality, OverlapLevel, Recommendation, SemanticFit};
use super::phrases;
use rand::seq::SliceRandom;
use rand::Rng;

/// Skills listed by name in the skills commentary
const LISTED_SKILLS: usize = 5;

/// Scoring signals of one candidate, on the scales they are stored with
#[derive(Debug, Clone, Copy)]
pub struct ExplanationSignals<'a> {
    pub skills: &'a [String],
    pub experience_years: f64,
    /// Final score on the `0..=scale` range
    pub match_score: f64,
    /// Semantic similarity on the `0..=scale` range
    pub semantic_similarity: f64,
    /// Fraction of job skills found in the resume
    pub skill_overlap: f64,
    pub scale: f64,
}

impl ExplanationSignals<'_> {
    fn score_unit(&self) -> f64 {
        to_unit(self.match_score, self.scale)
    }

    fn semantic_unit(&self) -> f64 {
        to_unit(self.semantic_similarity, self.scale)
    }
}

fn to_unit(value: f64, scale: f64) -> f64 {
    if scale > 0.0 && value.is_finite() {
        (value / scale).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn new() -> Self {
        Self
    }

    /// The seven explanation sentences in their fixed order: opening,
    /// skills, experience, semantic fit, skill overlap, recommendation and
    /// the numeric score statement
    pub fn explain_parts<R: Rng + ?Sized>(
        &self,
        signals: &ExplanationSignals<'_>,
        rng: &mut R,
    ) -> Vec<String> {
        let score_unit = signals.score_unit();
        let years = format_years(signals.experience_years);

        let (fit, openings) = phrases::opening(MatchQuality::from_unit(score_unit));
        let opening = pick(openings, rng).replace("{fit}", fit);

        let experience = pick(
            phrases::experience(ExperienceBand::from_years(signals.experience_years)),
            rng,
        )
        .replace("{years}", &years);

        let semantic = pick(
            phrases::semantic(SemanticFit::from_unit(signals.semantic_unit())),
            rng,
        )
        .to_string();

        let overlap = pick(
            phrases::overlap(OverlapLevel::from_ratio(signals.skill_overlap)),
            rng,
        )
        .to_string();

        let recommendation = pick(
            phrases::recommendation(Recommendation::from_unit(score_unit)),
            rng,
        )
        .to_string();

        let score_statement = format!(
            "Overall match score: {:.1}/{} ({:.0}% semantic alignment, {:.0}% skill overlap).",
            signals.match_score,
            signals.scale,
            signals.semantic_unit() * 100.0,
            signals.skill_overlap.clamp(0.0, 1.0) * 100.0
        );

        vec![
            opening,
            skills_commentary(signals.skills),
            experience,
            semantic,
            overlap,
            recommendation,
            score_statement,
        ]
    }

    pub fn explain<R: Rng + ?Sized>(&self, signals: &ExplanationSignals<'_>, rng: &mut R) -> String {
        self.explain_parts(signals, rng).join(" ")
    }
}

fn pick<'a, R: Rng + ?Sized>(bank: &'a [&'a str], rng: &mut R) -> &'a str {
    bank.choose(rng).copied().unwrap_or_default()
}

fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{:.0}", years)
    } else {
        format!("{:.1}", years)
    }
}

/// "a", "a and b", "a, b, and c"
fn oxford_join(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

fn skills_commentary(skills: &[String]) -> String {
    if skills.is_empty() {
        return phrases::NO_SKILLS.to_string();
    }

    let listed: Vec<&str> = skills.iter().take(LISTED_SKILLS).map(String::as_str).collect();
    let listed = oxford_join(&listed);

    let mut commentary = if skills.len() >= 8 {
        format!(
            "The candidate demonstrates a diverse technical toolkit including {}.",
            listed
        )
    } else if skills.len() >= 4 {
        format!("The candidate shows proficiency in several areas, such as {}.", listed)
    } else {
        format!("The candidate has skills in {}.", listed)
    };

    if skills.len() > 10 {
        commentary.push_str(phrases::BROAD_SKILLS);
    } else if skills.len() < 3 {
        commentary.push_str(phrases::FEW_SKILLS);
    }

    commentary
}

/// One-line summary: `"<label> | <experience> | <skills>"`
pub fn brief_summary(score_unit: f64, skills: &[String], experience_years: f64) -> String {
    let label = MatchQuality::from_unit(score_unit).summary_label();
    let experience = ExperienceBand::summary_descriptor(experience_years);

    let skills_desc = match skills {
        [] => "Skills not specified".to_string(),
        [only] => format!("Skill focus on {}", only),
        [first, second] => format!("Skills include {} and {}", first, second),
        [first, second, third, ..] => {
            format!("Skills include {}, {}, and {}", first, second, third)
        }
    };

    format!("{} | {} | {}", label, experience, skills_desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn signals(skills: &[String]) -> ExplanationSignals<'_> {
        ExplanationSignals {
            skills,
            experience_years: 6.0,
            match_score: 7.4,
            semantic_similarity: 8.8,
            skill_overlap: 0.5,
            scale: 10.0,
        }
    }

    #[test]
    fn test_explanation_has_fixed_structure() {
        let skills = skills(&["Python", "Sql", "Pandas", "Docker"]);
        let generator = ExplanationGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);

        let parts = generator.explain_parts(&signals(&skills), &mut rng);

        assert_eq!(parts.len(), 7);
        assert!(parts[0].contains("a good fit"));
        assert!(parts[1].contains("several areas"));
        assert!(parts[1].contains("Python, Sql, Pandas, and Docker"));
        assert!(phrases::experience(ExperienceBand::Solid)
            .iter()
            .any(|p| p.replace("{years}", "6") == parts[2]));
        assert!(phrases::semantic(SemanticFit::Strong).contains(&parts[3].as_str()));
        assert!(phrases::overlap(OverlapLevel::Partial).contains(&parts[4].as_str()));
        assert!(phrases::recommendation(Recommendation::Potential).contains(&parts[5].as_str()));
        assert_eq!(
            parts[6],
            "Overall match score: 7.4/10 (88% semantic alignment, 50% skill overlap)."
        );
    }

    #[test]
    fn test_same_seed_gives_same_wording() {
        let skills = skills(&["Rust"]);
        let generator = ExplanationGenerator::new();

        let first = generator.explain(&signals(&skills), &mut StdRng::seed_from_u64(42));
        let second = generator.explain(&signals(&skills), &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn test_skills_commentary_tiers() {
        assert_eq!(skills_commentary(&[]), phrases::NO_SKILLS);

        let few = skills_commentary(&skills(&["Rust", "Go"]));
        assert!(few.starts_with("The candidate has skills in Rust and Go."));
        assert!(few.ends_with(phrases::FEW_SKILLS));

        let many: Vec<String> = (1..=11).map(|i| format!("Skill{}", i)).collect();
        let broad = skills_commentary(&many);
        assert!(broad.contains("diverse technical toolkit"));
        assert!(broad.contains("Skill1, Skill2, Skill3, Skill4, and Skill5."));
        assert!(!broad.contains("Skill6"));
        assert!(broad.ends_with(phrases::BROAD_SKILLS));

        let eight: Vec<String> = (1..=8).map(|i| format!("S{}", i)).collect();
        let diverse = skills_commentary(&eight);
        assert!(diverse.contains("diverse"));
        assert!(!diverse.contains(phrases::BROAD_SKILLS));
    }

    #[test]
    fn test_low_score_wording() {
        let generator = ExplanationGenerator::new();
        let signals = ExplanationSignals {
            skills: &[],
            experience_years: 0.0,
            match_score: 1.5,
            semantic_similarity: 3.0,
            skill_overlap: 0.0,
            scale: 10.0,
        };

        let parts = generator.explain_parts(&signals, &mut StdRng::seed_from_u64(1));

        assert!(parts[0].contains("a poor match"));
        assert_eq!(parts[1], phrases::NO_SKILLS);
        assert!(phrases::experience(ExperienceBand::Minimal).contains(&parts[2].as_str()));
        assert!(phrases::recommendation(Recommendation::Weak).contains(&parts[5].as_str()));
    }

    #[test]
    fn test_oxford_join() {
        assert_eq!(oxford_join(&[]), "");
        assert_eq!(oxford_join(&["a"]), "a");
        assert_eq!(oxford_join(&["a", "b"]), "a and b");
        assert_eq!(oxford_join(&["a", "b", "c"]), "a, b, and c");
    }

    #[test]
    fn test_brief_summary() {
        assert_eq!(
            brief_summary(0.9, &skills(&["Python", "Sql", "Aws", "Docker"]), 12.0),
            "Excellent match | experienced professional | Skills include Python, Sql, and Aws"
        );
        assert_eq!(
            brief_summary(0.72, &skills(&["Python", "Sql"]), 5.0),
            "Strong candidate | mid-level candidate | Skills include Python and Sql"
        );
        assert_eq!(
            brief_summary(0.4, &skills(&["Excel"]), 1.5),
            "Limited alignment | early-career candidate | Skill focus on Excel"
        );
        assert_eq!(
            brief_summary(0.1, &[], 0.0),
            "Poor match | entry-level candidate | Skills not specified"
        );
    }
}
