//! Admin-side search and filtering over registration submissions.

use serde::Deserialize;

use crate::registration::RegistrationForm;

/// Filter parameters for the admin submission listing and CSV export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionFilter {
    /// Case-insensitive substring over names, university, department, clan
    /// and project names.
    pub search: Option<String>,
    /// Exact university match.
    pub university: Option<String>,
    /// Matches when any project has this category.
    pub category: Option<String>,
}

impl SubmissionFilter {
    /// Whether no content filter is set (status/type filters live in SQL).
    pub fn is_empty(&self) -> bool {
        non_blank(&self.search).is_none()
            && non_blank(&self.university).is_none()
            && non_blank(&self.category).is_none()
    }

    pub fn matches(&self, form: &RegistrationForm) -> bool {
        self.matches_search(form) && self.matches_university(form) && self.matches_category(form)
    }

    fn matches_search(&self, form: &RegistrationForm) -> bool {
        let Some(term) = non_blank(&self.search) else {
            return true;
        };
        let term = term.to_lowercase();
        let hit = |s: &str| s.to_lowercase().contains(&term);

        hit(&form.first_name)
            || hit(&form.last_name)
            || hit(&form.university)
            || hit(&form.department)
            || hit(&form.clan_name)
            || form.projects.iter().any(|p| hit(&p.project_name))
    }

    fn matches_university(&self, form: &RegistrationForm) -> bool {
        non_blank(&self.university).map_or(true, |u| form.university == u)
    }

    fn matches_category(&self, form: &RegistrationForm) -> bool {
        non_blank(&self.category).map_or(true, |c| {
            form.projects
                .iter()
                .any(|p| p.project_category.as_str() == c)
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> RegistrationForm {
        RegistrationForm::from_stored(&json!({
            "firstName": "Ali",
            "lastName": "Yılmaz",
            "phone": "05551234567",
            "university": "YTU",
            "department": "Computer Engineering",
            "classYear": "2",
            "clanName": "Falcons",
            "clanRole": "leader",
            "projects": [
                { "projectName": "Campus Map", "projectSummary": "interactive campus map",
                  "projectCategory": "web", "projectTechTags": ["React"], "projectStatus": "active" },
                { "projectName": "Line Follower", "projectSummary": "small robot project",
                  "projectCategory": "robotics", "projectTechTags": ["C"], "projectStatus": "idea" }
            ],
            "consentKVKK": true
        }))
        .unwrap()
    }

    fn filter(search: Option<&str>, university: Option<&str>, category: Option<&str>) -> SubmissionFilter {
        SubmissionFilter {
            search: search.map(String::from),
            university: university.map(String::from),
            category: category.map(String::from),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = SubmissionFilter::default();
        assert!(f.is_empty());
        assert!(f.matches(&form()));
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert!(filter(Some("  "), Some(""), None).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        assert!(filter(Some("falc"), None, None).matches(&form()));
        assert!(filter(Some("ENGINEERING"), None, None).matches(&form()));
        assert!(filter(Some("follower"), None, None).matches(&form()));
        assert!(!filter(Some("drone"), None, None).matches(&form()));
    }

    #[test]
    fn university_is_exact() {
        assert!(filter(None, Some("YTU"), None).matches(&form()));
        assert!(!filter(None, Some("YT"), None).matches(&form()));
    }

    #[test]
    fn category_matches_any_project() {
        assert!(filter(None, None, Some("robotics")).matches(&form()));
        assert!(!filter(None, None, Some("ai")).matches(&form()));
    }

    #[test]
    fn filters_combine_with_and() {
        assert!(!filter(Some("ali"), Some("ITU"), None).matches(&form()));
    }
}
