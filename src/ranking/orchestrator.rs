//! Ranking pipeline: prepares the job once, scores every resume against it
//! in isolation and sorts the survivors by match score.

use crate::config::Config;
use crate::explanation::{brief_summary, ExplanationGenerator, ExplanationSignals};
use crate::input::{DocumentTextExtractor, TextExtractor};
use crate::processing::{
    ContactExtractor, Embedder, ProfileExtractor, RegexContactExtractor, ResumeTextCleaner,
    TaxonomyProfileExtractor, TextCleaner,
};
use crate::ranking::result::{MatchResult, RankingRun, Skipped, SkippedCandidate};
use crate::scoring::{round2, skill_overlap, ScoreAggregator, SimilarityOutcome, SimilarityScorer};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// The job side of a run, computed once and shared read-only
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub cleaned_text: String,
    pub embedding: Vec<f32>,
    /// Lowercase canonical skill tokens
    pub skills: HashSet<String>,
}

#[derive(Clone)]
pub struct RankingPipeline {
    extractor: Arc<dyn TextExtractor>,
    cleaner: Arc<dyn TextCleaner>,
    contacts: Arc<dyn ContactExtractor>,
    profiles: Arc<dyn ProfileExtractor>,
    embedder: Arc<dyn Embedder>,
    scorer: SimilarityScorer,
    aggregator: ScoreAggregator,
    explainer: ExplanationGenerator,
    phrase_seed: Option<u64>,
    max_concurrency: usize,
}

impl RankingPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        cleaner: Arc<dyn TextCleaner>,
        contacts: Arc<dyn ContactExtractor>,
        profiles: Arc<dyn ProfileExtractor>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            extractor,
            cleaner,
            contacts,
            profiles,
            embedder,
            scorer: SimilarityScorer::default(),
            aggregator: ScoreAggregator::default(),
            explainer: ExplanationGenerator::new(),
            phrase_seed: None,
            max_concurrency: 4,
        }
    }

    /// Default collaborators around the given embedder, tuned by `config`
    pub fn from_config(config: &Config, embedder: Arc<dyn Embedder>) -> Self {
        let scoring = &config.scoring;

        Self::new(
            Arc::new(DocumentTextExtractor::new()),
            Arc::new(ResumeTextCleaner::new()),
            Arc::new(RegexContactExtractor::new()),
            Arc::new(TaxonomyProfileExtractor::new()),
            embedder,
        )
        .with_scorer(SimilarityScorer::new(scoring.scale, scoring.min_match_threshold))
        .with_aggregator(ScoreAggregator::new(
            scoring.weights(),
            scoring.scale,
            scoring.experience_cap_years,
        ))
        .with_max_concurrency(config.processing.max_concurrency)
    }

    pub fn with_scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_aggregator(mut self, aggregator: ScoreAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Pin explanation wording; candidate `i` draws phrases from `seed + i`
    pub fn with_phrase_seed(mut self, seed: u64) -> Self {
        self.phrase_seed = Some(seed);
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Clean, embed and extract the skills of the job description.
    /// `None` when nothing is left after cleaning.
    pub fn prepare_job(&self, job_description: &str) -> Option<JobQuery> {
        let cleaned_text = self.cleaner.clean(job_description);
        if cleaned_text.is_empty() {
            warn!("Job description is empty after cleaning; nothing to rank against");
            return None;
        }

        let embedding = self.embedder.embed(&cleaned_text);
        let skills = lowercase_set(&self.profiles.extract_profile(&cleaned_text).skills);

        debug!(
            "Job prepared: {} skills, {}-dimensional embedding",
            skills.len(),
            embedding.len()
        );

        Some(JobQuery {
            cleaned_text,
            embedding,
            skills,
        })
    }

    /// Score one resume against a prepared job
    pub fn process_candidate(
        &self,
        job: &JobQuery,
        path: &Path,
        index: usize,
    ) -> Result<MatchResult, Skipped> {
        let raw_text = self
            .extractor
            .extract_text(path)
            .map_err(|e| Skipped::Failed(e.to_string()))?;
        if raw_text.trim().is_empty() {
            return Err(Skipped::NoText);
        }

        let cleaned = self.cleaner.clean(&raw_text);
        if cleaned.is_empty() {
            return Err(Skipped::EmptyAfterCleaning);
        }

        let contact = self.contacts.extract_contacts(&cleaned);
        let profile = self.profiles.extract_profile(&cleaned);
        let resume_skills = lowercase_set(&profile.skills);

        let embedding = self.embedder.embed(&cleaned);
        let semantic_similarity = match self.scorer.similarity(&job.embedding, &embedding) {
            SimilarityOutcome::Score(score) => score,
            SimilarityOutcome::NoMatch(reason) => return Err(Skipped::NoSemanticMatch(reason)),
        };

        let overlap = skill_overlap(&job.skills, &resume_skills);
        let match_score = self.aggregator.final_score(
            semantic_similarity / self.scorer.scale,
            profile.experience_years,
            overlap,
        );

        let signals = ExplanationSignals {
            skills: &profile.skills,
            experience_years: profile.experience_years,
            match_score,
            semantic_similarity,
            skill_overlap: overlap,
            scale: self.aggregator.scale,
        };
        let explanation = match self.phrase_seed {
            Some(seed) => self.explainer.explain(
                &signals,
                &mut StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            ),
            None => self.explainer.explain(&signals, &mut rand::thread_rng()),
        };
        let summary = brief_summary(
            match_score / self.aggregator.scale,
            &profile.skills,
            profile.experience_years,
        );

        debug!(
            "Scored {}: semantic {:.2}, overlap {:.2}, match {:.2}",
            path.display(),
            semantic_similarity,
            overlap,
            match_score
        );

        Ok(MatchResult {
            source: path.to_path_buf(),
            email: contact.primary_email,
            phone_numbers: contact.phone_numbers,
            skills: profile.skills,
            education: profile.education,
            experience_years: round2(profile.experience_years),
            experience_level: profile.experience_level,
            domain: profile.domain,
            certifications: profile.certifications,
            project_count: profile.project_count,
            semantic_similarity,
            skill_overlap: round2(overlap),
            match_score,
            explanation,
            summary,
        })
    }

    /// Rank resumes one at a time on the current thread
    pub fn rank_sequential_with_report(&self, job_description: &str, paths: &[PathBuf]) -> RankingRun {
        let start_time = Instant::now();
        let Some(job) = self.prepare_job(job_description) else {
            return RankingRun::default();
        };

        let outcomes = paths
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    self.process_candidate(&job, path, index)
                }))
                .unwrap_or_else(|_| Err(Skipped::Failed("candidate processing panicked".to_string())));
                (path.clone(), outcome)
            })
            .collect();

        finish(outcomes, start_time)
    }

    pub fn rank_sequential(&self, job_description: &str, paths: &[PathBuf]) -> Vec<MatchResult> {
        self.rank_sequential_with_report(job_description, paths).results
    }

    /// Rank resumes on the blocking pool, at most `max_concurrency` at a
    /// time. Outcomes are collected in input order so the ranking is the
    /// same as the sequential one.
    pub async fn rank_with_report(&self, job_description: &str, paths: &[PathBuf]) -> RankingRun {
        let start_time = Instant::now();

        let pipeline = self.clone();
        let description = job_description.to_string();
        let prepared = tokio::task::spawn_blocking(move || pipeline.prepare_job(&description)).await;
        let job = match prepared {
            Ok(Some(job)) => Arc::new(job),
            Ok(None) => return RankingRun::default(),
            Err(e) => {
                warn!("Job preparation task failed: {}", e);
                return RankingRun::default();
            }
        };
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        let mut handles = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    handles.push((path.clone(), Err(Skipped::Failed(e.to_string()))));
                    continue;
                }
            };

            let pipeline = self.clone();
            let job = Arc::clone(&job);
            let task_path = path.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                pipeline.process_candidate(&job, &task_path, index)
            });
            handles.push((path.clone(), Ok(handle)));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (path, handle) in handles {
            let outcome = match handle {
                Ok(handle) => handle
                    .await
                    .unwrap_or_else(|e| Err(Skipped::Failed(format!("candidate task failed: {}", e)))),
                Err(skipped) => Err(skipped),
            };
            outcomes.push((path, outcome));
        }

        finish(outcomes, start_time)
    }

    pub async fn rank(&self, job_description: &str, paths: &[PathBuf]) -> Vec<MatchResult> {
        self.rank_with_report(job_description, paths).await.results
    }
}

fn lowercase_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Split outcomes, log skips and sort results by score, highest first.
/// The sort is stable so equal scores keep input order.
fn finish(outcomes: Vec<(PathBuf, Result<MatchResult, Skipped>)>, start_time: Instant) -> RankingRun {
    let mut run = RankingRun::default();

    for (source, outcome) in outcomes {
        match outcome {
            Ok(result) => run.results.push(result),
            Err(reason) => {
                if reason.is_failure() {
                    warn!("Skipping {}: {}", source.display(), reason);
                } else {
                    debug!("Skipping {}: {}", source.display(), reason);
                }
                run.skipped.push(SkippedCandidate { source, reason });
            }
        }
    }

    run.results.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });

    info!(
        "Ranked {} of {} candidates in {:.2?} ({} skipped)",
        run.results.len(),
        run.candidate_count(),
        start_time.elapsed(),
        run.skipped.len()
    );

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ResumeRankerError};
    use crate::scoring::NoMatchReason;
    use std::collections::HashMap;

    const VOCABULARY: [&str; 6] = ["python", "sql", "excel", "java", "docker", "aws"];

    /// Bag-of-words counts over a tiny vocabulary
    struct KeywordEmbedder;

    impl Embedder for KeywordEmbedder {
        fn embed(&self, text: &str) -> Vec<f32> {
            VOCABULARY
                .iter()
                .map(|word| {
                    text.split(|c: char| !c.is_alphanumeric())
                        .filter(|w| w == word)
                        .count() as f32
                })
                .collect()
        }

        fn dimension(&self) -> usize {
            VOCABULARY.len()
        }
    }

    /// In-memory resumes keyed by path; "FAIL" errors and "PANIC" panics
    struct MemoryExtractor(HashMap<PathBuf, String>);

    impl TextExtractor for MemoryExtractor {
        fn extract_text(&self, path: &Path) -> Result<String> {
            match self.0.get(path).map(String::as_str) {
                Some("FAIL") => Err(ResumeRankerError::PdfExtraction("corrupt file".to_string())),
                Some("PANIC") => panic!("extractor blew up"),
                Some(text) => Ok(text.to_string()),
                None => Ok(String::new()),
            }
        }
    }

    fn pipeline(resumes: &[(&str, &str)]) -> (RankingPipeline, Vec<PathBuf>) {
        let paths: Vec<PathBuf> = resumes.iter().map(|(name, _)| PathBuf::from(name)).collect();
        let texts = resumes
            .iter()
            .map(|(name, text)| (PathBuf::from(name), text.to_string()))
            .collect();

        let pipeline = RankingPipeline::new(
            Arc::new(MemoryExtractor(texts)),
            Arc::new(ResumeTextCleaner::new()),
            Arc::new(RegexContactExtractor::new()),
            Arc::new(TaxonomyProfileExtractor::new().with_current_year(2024)),
            Arc::new(KeywordEmbedder),
        )
        .with_phrase_seed(11)
        .with_max_concurrency(2);

        (pipeline, paths)
    }

    const JOB: &str = "Data analyst with Python and SQL";

    #[test]
    fn test_prepare_job() {
        let (pipeline, _) = pipeline(&[]);
        let job = pipeline.prepare_job(JOB).unwrap();

        assert_eq!(job.cleaned_text, "data analyst with python and sql");
        assert_eq!(job.embedding, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            job.skills,
            HashSet::from(["python".to_string(), "sql".to_string()])
        );
        assert!(pipeline.prepare_job("  • • ").is_none());
    }

    #[test]
    fn test_process_candidate_builds_result() {
        let (pipeline, paths) = pipeline(&[(
            "jane.txt",
            "Jane Doe jane@example.com +1 555 123 4567\nPython and Excel, 6 years of experience",
        )]);
        let job = pipeline.prepare_job(JOB).unwrap();

        let result = pipeline.process_candidate(&job, &paths[0], 0).unwrap();

        assert_eq!(result.source, PathBuf::from("jane.txt"));
        assert_eq!(result.email, "jane@example.com");
        assert_eq!(result.phone_numbers, vec!["+15551234567"]);
        assert_eq!(result.skills, vec!["Excel", "Python"]);
        assert_eq!(result.experience_years, 6.0);
        assert_eq!(result.experience_level, "Mid-Level");
        assert_eq!(result.skill_overlap, 0.5);
        // cosine 0.5 -> rescaled 0.75 -> banded 0.825
        assert_eq!(result.semantic_similarity, 8.25);
        assert_eq!(
            result.match_score,
            ScoreAggregator::default().final_score(0.825, 6.0, 0.5)
        );
        assert!(result.explanation.contains("Overall match score: 6.9/10"));
        assert!(result.summary.starts_with("Moderate fit | mid-level candidate"));
    }

    #[test]
    fn test_skip_reasons() {
        let (pipeline, paths) = pipeline(&[
            ("missing.pdf", ""),
            ("bullets.txt", "• • •"),
            ("marketing.txt", "marketing and sales lead"),
            ("broken.pdf", "FAIL"),
        ]);
        let job = pipeline.prepare_job(JOB).unwrap();

        let reasons: Vec<Skipped> = paths
            .iter()
            .enumerate()
            .map(|(i, path)| pipeline.process_candidate(&job, path, i).unwrap_err())
            .collect();

        assert_eq!(reasons[0], Skipped::NoText);
        assert_eq!(reasons[1], Skipped::EmptyAfterCleaning);
        assert_eq!(
            reasons[2],
            Skipped::NoSemanticMatch(NoMatchReason::DegenerateVector)
        );
        assert!(reasons[3].is_failure());
    }

    #[test]
    fn test_sequential_ranking_sorts_and_isolates_faults() {
        let (pipeline, paths) = pipeline(&[
            ("weak.txt", "java developer"),
            ("broken.pdf", "FAIL"),
            ("strong.txt", "python sql analyst, 5 years"),
            ("crash.txt", "PANIC"),
            ("partial.txt", "python developer"),
        ]);

        let run = pipeline.rank_sequential_with_report(JOB, &paths);
        let ranked: Vec<_> = run.results.iter().map(|r| r.source.clone()).collect();

        assert_eq!(
            ranked,
            vec![
                PathBuf::from("strong.txt"),
                PathBuf::from("partial.txt"),
                PathBuf::from("weak.txt"),
            ]
        );
        assert_eq!(run.skipped.len(), 2);
        assert_eq!(run.skipped[0].source, PathBuf::from("broken.pdf"));
        assert_eq!(run.skipped[1].source, PathBuf::from("crash.txt"));
        assert!(run.skipped.iter().all(|s| s.reason.is_failure()));
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let (pipeline, paths) = pipeline(&[
            ("first.txt", "python sql"),
            ("second.txt", "python sql"),
            ("third.txt", "python sql"),
        ]);

        let results = pipeline.rank_sequential(JOB, &paths);
        let order: Vec<_> = results.iter().map(|r| r.source.clone()).collect();

        assert_eq!(order, paths);
        assert!(results.windows(2).all(|w| w[0].match_score == w[1].match_score));
    }

    #[test]
    fn test_empty_job_short_circuits() {
        let (pipeline, paths) = pipeline(&[("a.txt", "python")]);
        let run = pipeline.rank_sequential_with_report("   ", &paths);

        assert!(run.results.is_empty());
        assert!(run.skipped.is_empty());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let (pipeline, paths) = pipeline(&[
            ("a.txt", "python excel, 3 years"),
            ("b.txt", "sql docker aws"),
        ]);

        let first = pipeline.rank_sequential(JOB, &paths);
        let second = pipeline.rank_sequential(JOB, &paths);

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let (pipeline, paths) = pipeline(&[
            ("a.txt", "python excel, 3 years"),
            ("b.txt", "FAIL"),
            ("c.txt", "sql docker aws"),
            ("d.txt", "PANIC"),
            ("e.txt", "python sql"),
            ("f.txt", "python sql"),
        ]);

        let sequential = pipeline.rank_sequential_with_report(JOB, &paths);
        let concurrent = pipeline.rank_with_report(JOB, &paths).await;

        assert_eq!(sequential.results, concurrent.results);
        assert_eq!(
            sequential.skipped.iter().map(|s| &s.source).collect::<Vec<_>>(),
            concurrent.skipped.iter().map(|s| &s.source).collect::<Vec<_>>()
        );
        assert_eq!(concurrent.results.len(), 4);
    }

    /// Remembers which threads embedding ran on
    struct ThreadRecordingEmbedder(std::sync::Mutex<Vec<std::thread::ThreadId>>);

    impl Embedder for ThreadRecordingEmbedder {
        fn embed(&self, text: &str) -> Vec<f32> {
            if let Ok(mut threads) = self.0.lock() {
                threads.push(std::thread::current().id());
            }
            KeywordEmbedder.embed(text)
        }

        fn dimension(&self) -> usize {
            VOCABULARY.len()
        }
    }

    #[tokio::test]
    async fn test_concurrent_ranking_embeds_off_the_runtime_thread() {
        let embedder = Arc::new(ThreadRecordingEmbedder(std::sync::Mutex::new(Vec::new())));
        let texts = HashMap::from([(PathBuf::from("a.txt"), "python sql".to_string())]);
        let pipeline = RankingPipeline::new(
            Arc::new(MemoryExtractor(texts)),
            Arc::new(ResumeTextCleaner::new()),
            Arc::new(RegexContactExtractor::new()),
            Arc::new(TaxonomyProfileExtractor::new()),
            embedder.clone(),
        );

        let run = pipeline.rank_with_report(JOB, &[PathBuf::from("a.txt")]).await;
        assert_eq!(run.results.len(), 1);

        let runtime_thread = std::thread::current().id();
        let threads = embedder.0.lock().unwrap();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != runtime_thread));
    }
}
