//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::explanation::MatchQuality;
use crate::output::report::RankingReport;
use crate::ranking::MatchResult;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Picks the formatter for the requested [`OutputFormat`]
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, unit_score: f64) -> String {
        let quality = MatchQuality::from_unit(unit_score);
        let color = match quality {
            MatchQuality::Excellent => Color::Green,
            MatchQuality::Good => Color::BrightGreen,
            MatchQuality::Moderate => Color::Yellow,
            MatchQuality::Limited => Color::Red,
            MatchQuality::Low => Color::BrightRed,
        };
        let badge = quality.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_candidate(&self, rank: usize, result: &MatchResult, report: &RankingReport) -> String {
        let mut output = String::new();
        let scale = report.metadata.scale;

        output.push_str(&self.format_header(
            &format!("#{} {}", rank, file_label(&result.source)),
            2,
        ));
        output.push_str(&format!(
            "Match Score: {:.2}/{} {}\n",
            result.match_score,
            scale,
            self.format_score_badge(report.unit_score(result))
        ));
        output.push_str(&format!("{}\n", self.colorize(&result.summary, Color::Cyan)));
        output.push_str(&format!(
            "Semantic: {:.2}/{} | Skill overlap: {:.0}%\n",
            result.semantic_similarity,
            scale,
            result.skill_overlap * 100.0
        ));
        output.push_str(&format!("Email: {}\n", result.email));
        output.push_str(&format!("Phone: {}\n", join_or(&result.phone_numbers, "Not found")));
        output.push_str(&format!("Skills: {}\n", join_or(&result.skills, "None detected")));
        output.push_str(&format!(
            "Experience: {} years ({}) | Education: {} | Domain: {}\n",
            result.experience_years, result.experience_level, result.education, result.domain
        ));

        if self.detailed {
            if !result.certifications.is_empty() {
                output.push_str("Certifications:\n");
                for certification in &result.certifications {
                    output.push_str(&format!("  • {}\n", certification));
                }
            }
            output.push_str(&format!("Project mentions: {}\n", result.project_count));
            output.push_str(&format!("\n{}\n", result.explanation));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();
        let metadata = &report.metadata;

        output.push_str(&self.format_header("RESUME RANKING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Job: {} | Model: {} | Candidates: {} ranked, {} skipped\n",
            metadata.job_source,
            metadata.embedding_model,
            report.results.len(),
            report.skipped.len()
        ));

        if report.results.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("No candidate matched the job description.", Color::Yellow)
            ));
        }

        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&self.format_candidate(index + 1, result, report));
        }

        if !report.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped", 3));
            for skipped in &report.skipped {
                let line = format!("{}: {}", file_label(&skipped.source), skipped.reason);
                let color = if skipped.reason.is_failure() {
                    Color::Red
                } else {
                    Color::White
                };
                output.push_str(&format!("  {}\n", self.colorize(&line, color)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    /// Table cells cannot contain raw pipes
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();
        let metadata = &report.metadata;

        output.push_str("# Resume Ranking Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Job:** `{}` | **Model:** `{}` | **Candidates:** {}\n\n",
                metadata.job_source, metadata.embedding_model, metadata.candidates_total
            ));
            output.push_str(&format!(
                "**Weights:** semantic {:.2}, skills {:.2}, experience {:.2}\n\n",
                metadata.weights.semantic, metadata.weights.skills, metadata.weights.experience
            ));
        }

        output.push_str("## Ranking\n\n");
        if report.results.is_empty() {
            output.push_str("_No candidate matched the job description._\n\n");
        } else {
            output.push_str("| Rank | Resume | Score | Semantic | Skill Overlap | Experience | Summary |\n");
            output.push_str("|------|--------|-------|----------|---------------|------------|---------|\n");
            for (index, result) in report.results.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {:.2} | {:.2} | {:.0}% | {} yrs | {} |\n",
                    index + 1,
                    Self::escape_cell(&file_label(&result.source)),
                    result.match_score,
                    result.semantic_similarity,
                    result.skill_overlap * 100.0,
                    result.experience_years,
                    Self::escape_cell(&result.summary)
                ));
            }
            output.push('\n');
        }

        if self.detailed {
            output.push_str("## Candidates\n\n");
            for (index, result) in report.results.iter().enumerate() {
                output.push_str(&format!("### {}. {}\n\n", index + 1, file_label(&result.source)));
                output.push_str(&format!("- **Email:** {}\n", result.email));
                output.push_str(&format!(
                    "- **Phone:** {}\n",
                    join_or(&result.phone_numbers, "Not found")
                ));
                output.push_str(&format!(
                    "- **Skills:** {}\n",
                    join_or(&result.skills, "None detected")
                ));
                output.push_str(&format!("- **Education:** {}\n", result.education));
                output.push_str(&format!(
                    "- **Experience:** {} years ({})\n",
                    result.experience_years, result.experience_level
                ));
                output.push_str(&format!("- **Domain:** {}\n\n", result.domain));
                output.push_str(&format!("{}\n\n", result.explanation));
            }
        }

        if !report.skipped.is_empty() {
            output.push_str("## Skipped\n\n");
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "- `{}`: {}\n",
                    file_label(&skipped.source),
                    skipped.reason
                ));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, job_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(job_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_ranking{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_ranking{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_ranking{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::ranking::{RankingRun, Skipped, SkippedCandidate};
    use crate::scoring::ScoringWeights;
    use std::path::PathBuf;

    fn sample_result(name: &str, match_score: f64) -> MatchResult {
        MatchResult {
            source: PathBuf::from(format!("resumes/{}", name)),
            email: "jane@example.com".to_string(),
            phone_numbers: vec!["+15551234567".to_string()],
            skills: vec!["Python".to_string(), "Sql".to_string()],
            education: "MASTER".to_string(),
            experience_years: 6.0,
            experience_level: "Mid-Level".to_string(),
            domain: "Data Analytics".to_string(),
            certifications: vec!["aws certified cloud practitioner".to_string()],
            project_count: 2,
            semantic_similarity: 8.25,
            skill_overlap: 0.5,
            match_score,
            explanation: "This candidate looks like a good fit.".to_string(),
            summary: "Strong candidate | mid-level candidate | Skills include Python and Sql"
                .to_string(),
        }
    }

    fn sample_report() -> RankingReport {
        let run = RankingRun {
            results: vec![sample_result("jane.pdf", 7.4), sample_result("john.txt", 5.1)],
            skipped: vec![SkippedCandidate {
                source: PathBuf::from("resumes/scan.png"),
                reason: Skipped::NoText,
            }],
        };
        let metadata = ReportMetadata::new("job.txt", "potion-base-8M", ScoringWeights::default(), 10.0);
        RankingReport::new(run, metadata)
    }

    #[test]
    fn test_report_counts_candidates() {
        let mut report = sample_report();
        assert_eq!(report.metadata.candidates_total, 3);

        report.truncate(1);
        assert_eq!(report.results.len(), 1);
        assert!((report.unit_score(&report.results[0]) - 0.74).abs() < 1e-9);
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("█ RESUME RANKING"));
        assert!(output.contains("#1 jane.pdf"));
        assert!(output.contains("Match Score: 7.40/10 [GOOD]"));
        assert!(output.contains("Match Score: 5.10/10 [MODERATE]"));
        assert!(output.contains("Phone: +15551234567"));
        assert!(output.contains("This candidate looks like a good fit."));
        assert!(output.contains("scan.png: no extractable text"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_brief_output_hides_explanation() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(!output.contains("This candidate looks like a good fit."));
        assert!(output.contains("Strong candidate | mid-level candidate"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let json = JsonFormatter::new(true).format_report(&sample_report()).unwrap();
        let parsed: RankingReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].match_score, 7.4);
        assert_eq!(parsed.skipped[0].reason, Skipped::NoText);
        assert_eq!(parsed.metadata.embedding_model, "potion-base-8M");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.starts_with("# Resume Ranking Report"));
        assert!(output.contains("**Job:** `job.txt`"));
        assert!(output.contains("| 1 | jane.pdf | 7.40 | 8.25 | 50% | 6 yrs |"));
        assert!(output.contains("Strong candidate \\| mid-level candidate"));
        assert!(output.contains("- `scan.png`: no extractable text"));
        assert!(!output.contains("## Candidates"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("ranking.md");

        save_report_to_file("# Report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Report");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Json, "jobs/data_analyst.txt", false),
            "data_analyst_ranking.json"
        );
        assert!(suggest_filename(OutputFormat::Markdown, "job.md", true).ends_with(".md"));
    }
}
