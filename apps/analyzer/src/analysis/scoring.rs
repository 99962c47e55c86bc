//! Score Calculator — turns resume text and skill overlap into five 0–100 sub-scores.
//!
//! Pure and deterministic. All weighted sums are evaluated in integer tenths and truncated,
//! so `0.3 * 55` is exactly 16.5 rather than whatever the nearest `f64` happens to be.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::digits::parse_decimal;

/// Section headings whose presence counts toward the formatting score.
const HEADINGS: &[&str] = &[
    "experience",
    "work",
    "projects",
    "education",
    "skills",
    "summary",
];

const BULLET_MARKERS: &[char] = &['•', '-', '●'];

/// Skill-match score used when there is nothing to compare against.
const NEUTRAL_SKILL_MATCH: u32 = 50;

static YEARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\+?\s*(?:years?|yrs?)").expect("valid years pattern"));

/// The five sub-scores of a resume. Recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBundle {
    #[serde(rename = "overall_score")]
    pub overall: u32,
    #[serde(rename = "skill_match_score")]
    pub skill_match: u32,
    #[serde(rename = "experience_score")]
    pub experience: u32,
    #[serde(rename = "formatting_score")]
    pub formatting: u32,
    #[serde(rename = "ats_score")]
    pub ats: u32,
}

/// Intermediate formatting signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingSignals {
    pub heading: u32,
    pub bullet: u32,
    pub length: u32,
}

impl FormattingSignals {
    pub fn measure(resume_text: &str) -> Self {
        Self {
            heading: heading_score(resume_text),
            bullet: bullet_score(resume_text),
            length: length_score(word_count(resume_text)),
        }
    }

    /// 0.5 × heading + 0.2 × bullet + 0.3 × length, truncated.
    pub fn combined(&self) -> u32 {
        (5 * self.heading + 2 * self.bullet + 3 * self.length) / 10
    }
}

/// Computes the full score bundle.
///
/// `matched_skills` and `missing_skills` only contribute their sizes.
pub fn calculate_scores<S: AsRef<str>>(
    resume_text: &str,
    matched_skills: &[S],
    missing_skills: &[S],
) -> ScoreBundle {
    let skill_match = skill_match_score(matched_skills.len(), missing_skills.len());
    let experience = experience_score(max_years(resume_text));
    let formatting = FormattingSignals::measure(resume_text).combined();

    // 0.6 × skill + 0.4 × formatting
    let ats = (6 * skill_match + 4 * formatting) / 10;
    // 0.4 × skill + 0.3 × experience + 0.3 × formatting
    let overall = (4 * skill_match + 3 * experience + 3 * formatting) / 10;

    ScoreBundle {
        overall,
        skill_match,
        experience,
        formatting,
        ats,
    }
}

/// `floor(100 × matched / (matched + missing))`, or 50 when both are empty.
pub fn skill_match_score(matched: usize, missing: usize) -> u32 {
    let total = matched + missing;
    if total == 0 {
        return NEUTRAL_SKILL_MATCH;
    }
    (100 * matched / total) as u32
}

/// Largest "N years" / "N+ yrs" figure in the text, 0 if none.
///
/// Digits from any script count. Figures beyond `u64` saturate rather than drop out.
pub fn max_years(resume_text: &str) -> u64 {
    let lower = resume_text.to_lowercase();
    YEARS_PATTERN
        .captures_iter(&lower)
        .filter_map(|caps| parse_decimal(caps.get(1)?.as_str()))
        .max()
        .unwrap_or(0)
}

/// Threshold bands with inclusive lower bounds.
pub fn experience_score(years: u64) -> u32 {
    match years {
        y if y >= 8 => 95,
        y if y >= 5 => 85,
        y if y >= 3 => 75,
        y if y >= 1 => 65,
        _ => 50,
    }
}

/// Share of known headings present, as a percentage rounded half-up.
pub fn heading_score(resume_text: &str) -> u32 {
    let lower = resume_text.to_lowercase();
    let hits = HEADINGS.iter().filter(|h| lower.contains(*h)).count() as u32;
    let n = HEADINGS.len() as u32;
    (200 * hits + n) / (2 * n)
}

pub fn bullet_score(resume_text: &str) -> u32 {
    if resume_text.contains(BULLET_MARKERS) {
        100
    } else {
        65
    }
}

pub fn length_score(words: usize) -> u32 {
    match words {
        w if w < 150 => 55,
        w if w < 350 => 80,
        w if w < 1000 => 95,
        _ => 75,
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
