//! Text summary builder for CLI output.
//!
//! Formats human-readable lines for the role and the verdict in text mode.

use crate::model::{AnalysisResult, JobRole};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("[ {title} ]"));
    for item in items {
        lines.push(format!(" - {item}"));
    }
}

/// Build the target-position block.
pub(crate) fn build_role_summary(role: &JobRole) -> TextSummary {
    let rule = "=".repeat(40);
    let mut lines = vec![
        rule.clone(),
        format!("ROLE: {}", role.role.to_uppercase()),
        rule.clone(),
        format!("Level: {}", role.experience_level),
    ];
    push_section(&mut lines, "Required Tech Stack", &role.skills);
    push_section(&mut lines, "Key Missions", &role.responsibilities);
    push_section(&mut lines, "Qualifications", &role.qualifications);
    lines.push(rule);
    TextSummary { lines }
}

/// Build the verdict block for a completed screening.
pub(crate) fn build_verdict_summary(result: &AnalysisResult) -> TextSummary {
    let verdict = result.verdict();
    let mut lines = vec![format!("Verdict: {}", verdict.label())];
    if !result.screened_for_role.is_empty() {
        lines.push(format!("Screened for: {}", result.screened_for_role));
    }
    lines.push(format!("Experience: {}", result.experience_level));
    lines.push(format!("Skill match: {}", result.skill_match));
    lines.push(format!("Decision: {}", result.final_decision));
    lines.push(format!("AI reasoning: {}", verdict.reasoning()));
    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{sample_result, sample_role};

    #[test]
    fn role_summary_lists_every_section() {
        let s = build_role_summary(&sample_role("Backend Engineer"));
        assert_eq!(s.lines[1], "ROLE: BACKEND ENGINEER");
        assert!(s.lines.contains(&"[ Required Tech Stack ]".to_string()));
        assert!(s.lines.contains(&" - SQL".to_string()));
        assert!(s.lines.contains(&"[ Qualifications ]".to_string()));
    }

    #[test]
    fn empty_sections_are_skipped() {
        let mut role = sample_role("Cloud Architect");
        role.responsibilities.clear();
        let s = build_role_summary(&role);
        assert!(!s.lines.iter().any(|l| l.contains("Key Missions")));
    }

    #[test]
    fn verdict_summary_reflects_decision() {
        let s = build_verdict_summary(&sample_result("Interview Scheduled"));
        assert_eq!(s.lines[0], "Verdict: RECOMMENDED");

        let s = build_verdict_summary(&sample_result("Application Rejected"));
        assert_eq!(s.lines[0], "Verdict: NOT SELECTED");
        assert!(s.lines.contains(&"Decision: Application Rejected".to_string()));
    }
}
