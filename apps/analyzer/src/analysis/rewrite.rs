//! Rewrite Generator — a templated summary suggestion, not a generative call.

const MAX_SKILLS: usize = 8;
const SNIPPET_WORDS: usize = 35;
const NO_SKILLS_PLACEHOLDER: &str = "relevant skills";

const REWRITE_TEMPLATE: &str = r#"
Rewrite this resume summary to better match the job description:

Target Role Context:
• {jd_snippet}

Recommended Summary:
"Result-driven professional skilled in {top_skills}, with strong ability to learn fast, collaborate effectively, and deliver impactful results. Adept at solving problems, improving systems, and contributing meaningfully to team success. Eager to bring value aligned with the job requirements."
"#;

/// Fills the summary template with the top matched skills and the opening of the JD.
///
/// The resume text is accepted for signature stability but does not influence the output.
pub fn generate_rewrite(_resume_text: &str, job_description: &str, matched_skills: &[String]) -> String {
    let top_skills = if matched_skills.is_empty() {
        NO_SKILLS_PLACEHOLDER.to_string()
    } else {
        matched_skills
            .iter()
            .take(MAX_SKILLS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    REWRITE_TEMPLATE
        .replace("{jd_snippet}", &jd_snippet(job_description))
        .replace("{top_skills}", &top_skills)
        .trim()
        .to_string()
}

fn jd_snippet(job_description: &str) -> String {
    if job_description.is_empty() {
        return String::new();
    }
    let head: Vec<&str> = job_description.split_whitespace().take(SNIPPET_WORDS).collect();
    format!("{}...", head.join(" "))
}
