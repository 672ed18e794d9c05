//! CSV rendering of registration submissions.
//!
//! One row per project; the submitter's fields repeat on every row of the
//! same submission. A submission without projects produces no rows.

use crate::registration::RegistrationForm;
use crate::types::Timestamp;

/// Header row, in column order.
pub const CSV_HEADERS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "phone",
    "university",
    "department",
    "class_year",
    "clan_name",
    "clan_role",
    "project_name",
    "project_summary",
    "project_category",
    "tech_tags",
    "project_status",
    "submitted_at",
];

/// Quote a field when it contains a delimiter, quote or line break.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render `(form, submitted_at)` pairs as a CSV document with a header row.
pub fn render_csv<'a, I>(submissions: I) -> String
where
    I: IntoIterator<Item = (&'a RegistrationForm, Timestamp)>,
{
    let mut out = CSV_HEADERS.join(",");
    out.push('\n');

    for (form, submitted_at) in submissions {
        let submitted = submitted_at.to_rfc3339();
        for project in &form.projects {
            let tags = project.project_tech_tags.join(", ");
            let fields: [&str; 15] = [
                form.first_name.as_str(),
                form.last_name.as_str(),
                form.email.as_deref().unwrap_or(""),
                form.phone.as_str(),
                form.university.as_str(),
                form.department.as_str(),
                form.class_year.as_str(),
                form.clan_name.as_str(),
                form.clan_role.as_str(),
                project.project_name.as_str(),
                project.project_summary.as_str(),
                project.project_category.as_str(),
                &tags,
                project.project_status.as_str(),
                &submitted,
            ];
            let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }

    out
}

/// Download filename for an export produced at `now`.
pub fn export_filename(now: Timestamp) -> String {
    format!("form-submissions-{}.csv", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn form(projects: serde_json::Value) -> RegistrationForm {
        RegistrationForm::from_stored(&json!({
            "firstName": "Ali",
            "lastName": "Yılmaz",
            "phone": "05551234567",
            "university": "YTU",
            "department": "CE",
            "classYear": "2",
            "clanName": "Falcons",
            "clanRole": "leader",
            "projects": projects,
            "consentKVKK": true
        }))
        .unwrap()
    }

    fn project(name: &str, summary: &str) -> serde_json::Value {
        json!({
            "projectName": name,
            "projectSummary": summary,
            "projectCategory": "web",
            "projectTechTags": ["React", "Rust"],
            "projectStatus": "active"
        })
    }

    fn at() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    #[test]
    fn one_row_per_project() {
        let f = form(json!([project("A1", "first summary"), project("B2", "second summary")]));
        let csv = render_csv([(&f, at())]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("first_name,last_name"));
        assert!(lines[1].contains(",A1,"));
        assert!(lines[2].contains(",B2,"));
        assert!(lines[2].starts_with("Ali,Yılmaz,"));
    }

    #[test]
    fn tags_are_joined_and_quoted() {
        let f = form(json!([project("A1", "first summary")]));
        let csv = render_csv([(&f, at())]);
        assert!(csv.contains("\"React, Rust\""));
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn submission_without_projects_has_no_rows() {
        let f = form(json!([]));
        let csv = render_csv([(&f, at())]);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn filename_uses_date() {
        assert_eq!(export_filename(at()), "form-submissions-2024-05-06.csv");
    }
}
