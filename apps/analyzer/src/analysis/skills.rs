//! Skill sets — candidate skills from the job description versus skills found in the resume.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::inference::{EntityMap, SKILL_LABEL};

/// Upper bound on reported missing skills.
pub const MAX_MISSING_SKILLS: usize = 10;

static JD_WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w{4,}\b").expect("valid word pattern"));
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid word pattern"));

/// Overlap between job-description words and resume skills, both sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillComparison {
    pub matched: Vec<String>,
    /// At most [`MAX_MISSING_SKILLS`] entries.
    pub missing: Vec<String>,
}

/// Every lowercase word of four or more characters in the job description.
/// Deliberately crude: any such word counts as a candidate skill.
pub fn jd_words(job_description: &str) -> BTreeSet<String> {
    let lower = job_description.to_lowercase();
    JD_WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every lowercase word token of any length. Used for "does the JD mention X" checks.
pub fn word_tokens(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The lowercased surface strings the entity extractor labelled as skills.
pub fn resume_skills(entities: &EntityMap) -> BTreeSet<String> {
    entities
        .get(SKILL_LABEL)
        .map(|skills| skills.iter().map(|s| s.to_lowercase()).collect())
        .unwrap_or_default()
}

pub fn compare_skills(jd_words: &BTreeSet<String>, resume_skills: &BTreeSet<String>) -> SkillComparison {
    SkillComparison {
        matched: jd_words.intersection(resume_skills).cloned().collect(),
        missing: jd_words
            .difference(resume_skills)
            .take(MAX_MISSING_SKILLS)
            .cloned()
            .collect(),
    }
}
