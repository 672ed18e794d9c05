//! Plain-text summaries of newly received submissions.

use classhopper_core::registration::{RegistrationForm, TopicSuggestion};
use classhopper_core::submission::SubmissionType;
use classhopper_core::types::{DbId, Timestamp};
use serde::Serialize;

/// What moderators are told about one new submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionNotice {
    pub submission_id: DbId,
    pub submission_type: SubmissionType,
    pub received_at: Timestamp,
    /// Pre-rendered `label: value` lines.
    pub lines: Vec<String>,
}

impl SubmissionNotice {
    pub fn for_registration(id: DbId, received_at: Timestamp, form: &RegistrationForm) -> Self {
        let mut lines = vec![
            format!("Name: {} {}", form.first_name, form.last_name),
            format!("Email: {}", form.email.as_deref().unwrap_or("-")),
            format!("University: {}", form.university),
            format!("Department: {}", form.department),
            format!("Clan: {} ({})", form.clan_name, form.clan_role.as_str()),
            format!("Projects: {}", form.projects.len()),
        ];
        lines.extend(form.projects.iter().enumerate().map(|(i, p)| {
            format!(
                "  {}. {} [{}] {}",
                i + 1,
                p.project_name,
                p.project_category.as_str(),
                p.project_tech_tags.join(", ")
            )
        }));

        Self {
            submission_id: id,
            submission_type: SubmissionType::Form,
            received_at,
            lines,
        }
    }

    pub fn for_topic(id: DbId, received_at: Timestamp, topic: &TopicSuggestion) -> Self {
        Self {
            submission_id: id,
            submission_type: SubmissionType::TopicSuggestion,
            received_at,
            lines: vec![
                format!("Title: {}", topic.title),
                format!("Category: {}", topic.category_id),
                format!("Body: {}", topic.body),
            ],
        }
    }

    pub fn subject(&self) -> String {
        match self.submission_type {
            SubmissionType::Form => "[Classhopper] New registration".to_string(),
            SubmissionType::TopicSuggestion => "[Classhopper] New topic suggestion".to_string(),
        }
    }

    pub fn body(&self) -> String {
        format!(
            "Submission #{} received at {}\n\n{}\n",
            self.submission_id,
            self.received_at.to_rfc3339(),
            self.lines.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn form() -> RegistrationForm {
        RegistrationForm::from_stored(&serde_json::json!({
            "firstName": "Ali",
            "lastName": "Yılmaz",
            "phone": "05551234567",
            "university": "X",
            "department": "Y",
            "classYear": "2",
            "clanName": "Alpha",
            "clanRole": "leader",
            "projects": [{
                "projectName": "P1",
                "projectSummary": "A project summary long enough",
                "projectCategory": "web",
                "projectTechTags": ["React", "Node"],
                "projectStatus": "idea"
            }],
            "consentKVKK": true
        }))
        .unwrap()
    }

    #[test]
    fn registration_notice_lists_projects() {
        let notice = SubmissionNotice::for_registration(5, at(), &form());
        let body = notice.body();
        assert!(body.starts_with("Submission #5 received at 2024-03-01T12:00:00+00:00"));
        assert!(body.contains("Name: Ali Yılmaz"));
        assert!(body.contains("Email: -"));
        assert!(body.contains("Clan: Alpha (leader)"));
        assert!(body.contains("  1. P1 [web] React, Node"));
        assert_eq!(notice.subject(), "[Classhopper] New registration");
    }

    #[test]
    fn topic_notice_has_own_subject() {
        let topic = TopicSuggestion {
            title: "Rust study group".to_string(),
            body: "Weekly meetups".to_string(),
            category_id: "general".to_string(),
            tag_ids: vec![],
        };
        let notice = SubmissionNotice::for_topic(9, at(), &topic);
        assert_eq!(notice.subject(), "[Classhopper] New topic suggestion");
        assert!(notice.body().contains("Title: Rust study group"));
    }
}
