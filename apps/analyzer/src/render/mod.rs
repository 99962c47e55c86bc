//! HTML pages. Templates are compiled into the binary and registered once at startup.

use minijinja::Environment;
use serde::Serialize;

const INDEX_TEMPLATE: &str = "index.html";
const RESULT_TEMPLATE: &str = "result.html";

/// Pre-registered page templates. `.html` names are auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        env.add_template(RESULT_TEMPLATE, include_str!("../../templates/result.html"))?;
        Ok(Self { env })
    }

    pub fn render_index(&self) -> Result<String, minijinja::Error> {
        self.env
            .get_template(INDEX_TEMPLATE)?
            .render(minijinja::context!())
    }

    /// Renders the results page from any value exposing the report fields.
    pub fn render_result<T: Serialize>(&self, report: &T) -> Result<String, minijinja::Error> {
        self.env.get_template(RESULT_TEMPLATE)?.render(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_has_upload_form() {
        let html = Templates::new().unwrap().render_index().unwrap();
        assert!(html.contains(r#"action="/analyze""#));
        assert!(html.contains(r#"name="resume""#));
        assert!(html.contains(r#"name="job_description""#));
    }

    #[test]
    fn test_result_renders_fields_and_escapes() {
        let report = json!({
            "match_score": 61.25,
            "matched_skills": ["python"],
            "missing_skills": ["docker"],
            "suggestions": ["Your resume is short. Add more details."],
            "improved_summary": "Recommended Summary",
            "weak_lines": ["Responsible for <script>"],
            "overall_score": 46,
            "skill_match_score": 50,
            "experience_score": 50,
            "formatting_score": 38,
            "ats_score": 45
        });
        let html = Templates::new().unwrap().render_result(&report).unwrap();
        assert!(html.contains("61.25"));
        assert!(html.contains(r#"<span class="tag">python</span>"#));
        assert!(html.contains("docker"));
        assert!(html.contains("<td>38</td>"));
        assert!(html.contains("Responsible for &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_result_handles_empty_lists() {
        let report = json!({
            "match_score": 0.0,
            "matched_skills": [],
            "missing_skills": [],
            "suggestions": [],
            "improved_summary": "",
            "weak_lines": [],
            "overall_score": 0,
            "skill_match_score": 50,
            "experience_score": 50,
            "formatting_score": 0,
            "ats_score": 0
        });
        let html = Templates::new().unwrap().render_result(&report).unwrap();
        assert!(html.contains("No matching skills found."));
        assert!(html.contains("No weak lines detected."));
    }
}
