use crate::analysis::scoring::word_count;
use crate::analysis::skills::word_tokens;

/// Below this many words a resume is considered short.
const SHORT_RESUME_WORDS: usize = 150;

/// Keyword checks: (JD keyword, advice when the resume never mentions it).
const KEYWORD_CHECKS: &[(&str, &str)] = &[
    ("flask", "Add your Flask or backend experience."),
    ("sql", "Mention SQL or database exposure."),
    ("api", "Add details of APIs you built or used."),
];

const SECTION_KEYWORDS: &[&str] = &["experience", "projects", "work"];

pub const SHORT_RESUME: &str = "Your resume is short. Add more details.";
pub const MISSING_SECTIONS: &str = "Add an 'Experience' or 'Projects' section.";

/// Builds the advice list. Every check runs independently, in a fixed order,
/// so several suggestions can fire for the same resume.
pub fn build_suggestions(resume_text: &str, job_description: &str) -> Vec<String> {
    let resume_lower = resume_text.to_lowercase();
    let jd_tokens = word_tokens(job_description);
    let mut suggestions = Vec::new();

    for (keyword, advice) in KEYWORD_CHECKS {
        if jd_tokens.contains(*keyword) && !resume_lower.contains(keyword) {
            suggestions.push(advice.to_string());
        }
    }

    if word_count(resume_text) < SHORT_RESUME_WORDS {
        suggestions.push(SHORT_RESUME.to_string());
    }

    if !SECTION_KEYWORDS.iter().any(|k| resume_lower.contains(k)) {
        suggestions.push(MISSING_SECTIONS.to_string());
    }

    suggestions
}
