//! In-process approximations of the hosted models, for running without a model server.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{EntityExtractor, EntityMap, InferenceError, SimilarityScorer, SKILL_LABEL};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid token pattern"));

// Common technical and professional skills recognised by the gazetteer.
static KNOWN_SKILLS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "python", "java", "javascript", "typescript", "rust", "golang", "kotlin", "swift",
        "ruby", "php", "scala", "haskell", "elixir", "perl", "matlab", "sql", "nosql",
        "flask", "django", "fastapi", "spring", "rails", "laravel", "express", "react",
        "angular", "vue", "svelte", "nextjs", "node", "nodejs", "graphql", "rest", "grpc",
        "api", "apis", "microservices", "postgresql", "postgres", "mysql", "sqlite",
        "mongodb", "redis", "cassandra", "elasticsearch", "kafka", "rabbitmq", "spark",
        "hadoop", "airflow", "dbt", "snowflake", "bigquery", "docker", "kubernetes",
        "terraform", "ansible", "jenkins", "git", "github", "gitlab", "linux", "bash",
        "aws", "azure", "gcp", "lambda", "serverless", "pandas", "numpy", "scikit",
        "tensorflow", "pytorch", "keras", "nlp", "ml", "excel", "tableau", "figma",
        "agile", "scrum", "jira", "html", "css", "sass", "webpack", "ci", "cd", "devops",
        "leadership", "communication", "analytics", "testing", "selenium", "cypress",
    ]
    .into_iter()
    .collect()
});

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Bag-of-words cosine similarity over lowercase word counts.
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    pub fn cosine(a: &str, b: &str) -> f32 {
        let va = term_counts(a);
        let vb = term_counts(b);
        if va.is_empty() || vb.is_empty() {
            return 0.0;
        }

        let dot: f64 = va
            .iter()
            .filter_map(|(term, ca)| vb.get(term).map(|cb| ca * cb))
            .sum();
        let norm_a = va.values().map(|c| c * c).sum::<f64>().sqrt();
        let norm_b = vb.values().map(|c| c * c).sum::<f64>().sqrt();

        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0) as f32
    }
}

fn term_counts(text: &str) -> HashMap<String, f64> {
    let lower = text.to_lowercase();
    let mut counts = HashMap::new();
    for token in tokens(&lower) {
        *counts.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

#[async_trait]
impl SimilarityScorer for LexicalSimilarity {
    async fn similarity(&self, a: &str, b: &str) -> Result<f32, InferenceError> {
        Ok(Self::cosine(a, b))
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

/// Labels any word found in the built-in skill list as `SKILL`.
pub struct GazetteerEntityExtractor;

impl GazetteerEntityExtractor {
    pub fn extract(text: &str) -> EntityMap {
        let skills: BTreeSet<String> = tokens(text)
            .filter(|t| KNOWN_SKILLS.contains(t.to_lowercase().as_str()))
            .map(String::from)
            .collect();

        let mut entities = EntityMap::new();
        if !skills.is_empty() {
            entities.insert(SKILL_LABEL.to_string(), skills);
        }
        entities
    }
}

#[async_trait]
impl EntityExtractor for GazetteerEntityExtractor {
    async fn extract_entities(&self, text: &str) -> Result<EntityMap, InferenceError> {
        Ok(Self::extract(text))
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_score_one() {
        let s = LexicalSimilarity::cosine("Rust and Python", "rust AND python");
        assert!((s - 1.0).abs() < 1e-6, "got {s}");
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(LexicalSimilarity::cosine("rust tokio", "excel pivot"), 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(LexicalSimilarity::cosine("", "anything"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let s = LexicalSimilarity::cosine("python flask sql", "python django");
        assert!(s > 0.0 && s < 1.0, "got {s}");
    }

    #[test]
    fn test_gazetteer_finds_skills_and_keeps_surface_form() {
        let entities = GazetteerEntityExtractor::extract("Built Docker images with Python and Kafka.");
        let skills = entities.get(SKILL_LABEL).unwrap();
        assert!(skills.contains("Docker"));
        assert!(skills.contains("Python"));
        assert!(skills.contains("Kafka"));
        assert!(!skills.contains("Built"));
    }

    #[test]
    fn test_gazetteer_omits_label_when_nothing_found() {
        assert!(GazetteerEntityExtractor::extract("Gardening and cooking").is_empty());
    }

    #[tokio::test]
    async fn test_trait_objects_delegate() {
        let scorer: &dyn SimilarityScorer = &LexicalSimilarity;
        let s = scorer.similarity("a b", "a b").await.unwrap();
        assert!((s - 1.0).abs() < 1e-6, "got {s}");
        let extractor: &dyn EntityExtractor = &GazetteerEntityExtractor;
        assert!(extractor.extract_entities("rust").await.unwrap().contains_key(SKILL_LABEL));
    }
}
