//! Banned-word screening for public registrations.

use crate::error::CoreError;
use crate::registration::RegistrationForm;

/// Words refused when no `BANNED_WORDS` override is configured.
pub const DEFAULT_BANNED_WORDS: &[&str] = &["spam", "test", "fake"];

/// Parse a comma-separated banned-word list, lowercased, blanks dropped.
pub fn parse_banned_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Text screened for banned words: names plus every project name and summary.
fn screened_text(form: &RegistrationForm) -> String {
    let projects = form
        .projects
        .iter()
        .map(|p| format!("{} {}", p.project_name, p.project_summary))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {} {projects}", form.first_name, form.last_name).to_lowercase()
}

/// Reject the form if any banned word occurs as a substring of the screened text.
pub fn screen_registration(form: &RegistrationForm, banned: &[String]) -> Result<(), CoreError> {
    let text = screened_text(form);
    // The matched word is not echoed back to the caller.
    if banned.iter().any(|w| text.contains(w.as_str())) {
        return Err(CoreError::validation(
            "content",
            "Submitted content is not allowed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn form(first: &str, summary: &str) -> RegistrationForm {
        RegistrationForm::from_stored(&json!({
            "firstName": first,
            "lastName": "Demir",
            "phone": "05551234567",
            "university": "ITU",
            "department": "EE",
            "classYear": "3",
            "clanName": "Owls",
            "clanRole": "member",
            "projects": [{
                "projectName": "Rover",
                "projectSummary": summary,
                "projectCategory": "robotics",
                "projectTechTags": ["ROS"],
                "projectStatus": "idea"
            }],
            "consentKVKK": true
        }))
        .unwrap()
    }

    fn defaults() -> Vec<String> {
        DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn clean_form_passes() {
        assert!(screen_registration(&form("Zeynep", "an autonomous rover"), &defaults()).is_ok());
    }

    #[test]
    fn banned_word_in_summary_rejected_case_insensitively() {
        assert_matches!(
            screen_registration(&form("Zeynep", "Buy SPAM here now"), &defaults()),
            Err(CoreError::Validation { field, .. }) if field == "content"
        );
    }

    #[test]
    fn banned_word_in_name_rejected() {
        assert!(screen_registration(&form("Fakeuser", "an autonomous rover"), &defaults()).is_err());
    }

    #[test]
    fn empty_list_allows_everything() {
        assert!(screen_registration(&form("Zeynep", "spam spam spam"), &[]).is_ok());
    }

    #[test]
    fn parse_list_trims_and_lowercases() {
        assert_eq!(parse_banned_words(" Foo, ,BAR "), vec!["foo", "bar"]);
    }
}
