//! Analysis pipeline — one resume plus one job description in, one report out.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::rewrite::generate_rewrite;
use crate::analysis::scoring::{calculate_scores, ScoreBundle};
use crate::analysis::skills::{compare_skills, jd_words, resume_skills};
use crate::analysis::suggestions::build_suggestions;
use crate::analysis::weak_lines::find_weak_lines;
use crate::errors::AppError;
use crate::extraction::{ExtractionError, TextExtractor};
use crate::inference::ModelBackends;

/// Everything the results page shows.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Cosine similarity × 100, rounded to two decimals.
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub improved_summary: String,
    pub weak_lines: Vec<String>,
    #[serde(flatten)]
    pub scores: ScoreBundle,
}

/// Long-lived analysis service: the PDF extractor and both model backends,
/// built once at startup and shared read-only across requests.
pub struct Analyzer {
    text_extractor: Arc<dyn TextExtractor>,
    models: ModelBackends,
}

impl Analyzer {
    pub fn new(text_extractor: Arc<dyn TextExtractor>, models: ModelBackends) -> Self {
        Self {
            text_extractor,
            models,
        }
    }

    /// Extracts the stored resume on the blocking pool, then analyzes it.
    pub async fn analyze_file(
        &self,
        path: PathBuf,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        let extractor = Arc::clone(&self.text_extractor);
        let resume_text = tokio::task::spawn_blocking(move || extractor.extract_text(&path))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    AppError::Extraction(ExtractionError::Pdf(
                        "PDF parser aborted on malformed input".to_string(),
                    ))
                } else {
                    AppError::Internal(anyhow::anyhow!("extraction task failed: {e}"))
                }
            })??;

        debug!("Extracted {} characters of resume text", resume_text.len());
        self.analyze_text(&resume_text, job_description).await
    }

    pub async fn analyze_text(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        let (similarity, entities) = tokio::try_join!(
            self.models.similarity.similarity(resume_text, job_description),
            self.models.entities.extract_entities(resume_text),
        )?;

        let skills = compare_skills(&jd_words(job_description), &resume_skills(&entities));
        let scores = calculate_scores(resume_text, &skills.matched, &skills.missing);

        info!(
            similarity_backend = self.models.similarity.backend(),
            entity_backend = self.models.entities.backend(),
            matched = skills.matched.len(),
            missing = skills.missing.len(),
            overall = scores.overall,
            "Resume analyzed"
        );

        Ok(AnalysisReport {
            match_score: similarity_percent(similarity),
            suggestions: build_suggestions(resume_text, job_description),
            improved_summary: generate_rewrite(resume_text, job_description, &skills.matched),
            weak_lines: find_weak_lines(resume_text),
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            scores,
        })
    }
}

/// Scales a cosine similarity to a percentage with two decimals.
pub fn similarity_percent(cosine: f32) -> f64 {
    round_two_decimals(f64::from(cosine) * 100.0)
}

/// Rounds the exact binary value to two decimals, ties to even.
///
/// `{:.2}` formats the exact value of the float with ties-to-even, so a
/// format/parse round trip lands on the same float as decimal rounding.
fn round_two_decimals(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use async_trait::async_trait;

    use crate::inference::lexical::{GazetteerEntityExtractor, LexicalSimilarity};
    use crate::inference::{
        EntityExtractor, EntityMap, InferenceError, SimilarityScorer, SKILL_LABEL,
    };

    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn extract_text(&self, _path: &Path) -> Result<String, ExtractionError> {
            Ok(self.0.to_string())
        }
    }

    struct PanickingExtractor;

    impl TextExtractor for PanickingExtractor {
        fn extract_text(&self, _path: &Path) -> Result<String, ExtractionError> {
            panic!("corrupt xref table")
        }
    }

    struct FixedSimilarity(f32);

    #[async_trait]
    impl SimilarityScorer for FixedSimilarity {
        async fn similarity(&self, _a: &str, _b: &str) -> Result<f32, InferenceError> {
            Ok(self.0)
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    struct FixedSkills(&'static [&'static str]);

    #[async_trait]
    impl EntityExtractor for FixedSkills {
        async fn extract_entities(&self, _text: &str) -> Result<EntityMap, InferenceError> {
            let mut map = EntityMap::new();
            map.insert(
                SKILL_LABEL.to_string(),
                self.0.iter().map(|s| s.to_string()).collect(),
            );
            Ok(map)
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingEntities;

    #[async_trait]
    impl EntityExtractor for FailingEntities {
        async fn extract_entities(&self, _text: &str) -> Result<EntityMap, InferenceError> {
            Err(InferenceError::Unavailable { retries: 3 })
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn analyzer(
        text: Arc<dyn TextExtractor>,
        similarity: Arc<dyn SimilarityScorer>,
        entities: Arc<dyn EntityExtractor>,
    ) -> Analyzer {
        Analyzer::new(text, ModelBackends { similarity, entities })
    }

    #[test]
    fn test_similarity_percent_rounds_two_decimals() {
        assert_eq!(similarity_percent(0.5), 50.0);
        assert_eq!(similarity_percent(0.123456), 12.35);
        assert_eq!(similarity_percent(-0.25), -25.0);
    }

    #[test]
    fn test_two_decimal_ties_go_to_even() {
        assert_eq!(round_two_decimals(12.125), 12.12);
        assert_eq!(round_two_decimals(12.375), 12.38);
        assert_eq!(round_two_decimals(-0.125), -0.12);
        // 2.675 is stored slightly below the tie
        assert_eq!(round_two_decimals(2.675), 2.67);
        assert_eq!(similarity_percent(0.125), 12.5);
    }

    #[tokio::test]
    async fn test_short_resume_scenario() {
        // 100 words, "skills" heading only, no bullets, no years.
        let resume = format!("skills python {}", vec!["word"; 98].join(" "));
        let a = analyzer(
            Arc::new(FixedText("unused")),
            Arc::new(FixedSimilarity(0.5)),
            Arc::new(FixedSkills(&["Python"])),
        );

        let report = a.analyze_text(&resume, "python docker").await.unwrap();

        assert_eq!(report.match_score, 50.0);
        assert_eq!(report.matched_skills, vec!["python"]);
        assert_eq!(report.missing_skills, vec!["docker"]);
        assert_eq!(report.scores.skill_match, 50);
        assert_eq!(report.scores.experience, 50);
        assert_eq!(report.scores.formatting, 38);
        assert_eq!(report.scores.ats, 45);
        assert_eq!(report.scores.overall, 46);
        assert!(report.improved_summary.contains("skilled in python,"));
        assert_eq!(
            report.suggestions,
            vec![
                "Your resume is short. Add more details.",
                "Add an 'Experience' or 'Projects' section.",
            ]
        );
    }

    #[tokio::test]
    async fn test_report_serializes_flat_fields() {
        let a = analyzer(
            Arc::new(FixedText("unused")),
            Arc::new(LexicalSimilarity),
            Arc::new(GazetteerEntityExtractor),
        );
        let report = a
            .analyze_text("Responsible for Python services", "Python engineer")
            .await
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "match_score",
            "matched_skills",
            "missing_skills",
            "suggestions",
            "improved_summary",
            "weak_lines",
            "overall_score",
            "skill_match_score",
            "experience_score",
            "formatting_score",
            "ats_score",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["weak_lines"][0], "Responsible for Python services");
    }

    #[tokio::test]
    async fn test_analyze_file_uses_extractor() {
        let a = analyzer(
            Arc::new(FixedText("Experience: 6 years of Rust")),
            Arc::new(FixedSimilarity(0.8)),
            Arc::new(FixedSkills(&["rust"])),
        );
        let report = a
            .analyze_file(PathBuf::from("ignored.pdf"), "Senior rust engineer")
            .await
            .unwrap();
        assert_eq!(report.scores.experience, 85);
        assert_eq!(report.matched_skills, vec!["rust"]);
    }

    #[tokio::test]
    async fn test_extractor_panic_becomes_extraction_error() {
        let a = analyzer(
            Arc::new(PanickingExtractor),
            Arc::new(FixedSimilarity(0.8)),
            Arc::new(FixedSkills(&[])),
        );
        let err = a
            .analyze_file(PathBuf::from("broken.pdf"), "jd")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(ExtractionError::Pdf(_))));
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let a = analyzer(
            Arc::new(FixedText("unused")),
            Arc::new(FixedSimilarity(0.8)),
            Arc::new(FailingEntities),
        );
        let err = a.analyze_text("resume", "jd").await.unwrap_err();
        assert!(matches!(err, AppError::Inference(_)));
    }
}
