//! Pure helpers used while ingesting an approved registration.

use rand::Rng;

/// Country calling code prepended to national mobile numbers.
pub const COUNTRY_PREFIX: &str = "+90";

/// Upper bound (exclusive) of the numeric suffix on display handles.
pub const HANDLE_SUFFIX_RANGE: u32 = 1000;

/// Normalize a validated mobile number to the `+90…` international form.
///
/// - `05551234567` → `+905551234567` (trunk `0` replaced)
/// - `+905551234567` → unchanged
/// - `5551234567` → `+905551234567`
///
/// # Examples
///
/// ```
/// use classhopper_core::ingestion::normalize_phone;
///
/// assert_eq!(normalize_phone("05551234567"), "+905551234567");
/// assert_eq!(normalize_phone("+905551234567"), "+905551234567");
/// ```
pub fn normalize_phone(phone: &str) -> String {
    if let Some(rest) = phone.strip_prefix('0') {
        return format!("{COUNTRY_PREFIX}{rest}");
    }
    if phone.starts_with(COUNTRY_PREFIX) {
        return phone.to_string();
    }
    format!("{COUNTRY_PREFIX}{phone}")
}

/// Lowercase a name and drop everything that is not a letter or digit.
pub fn name_slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Build a display handle from a name pair and an explicit suffix.
pub fn display_handle_with_suffix(first_name: &str, last_name: &str, suffix: u32) -> String {
    format!("{}{}{suffix}", name_slug(first_name), name_slug(last_name))
}

/// Generate a display handle: name slug plus a random suffix in `0..1000`.
///
/// Handles are not checked for uniqueness.
pub fn generate_display_handle(first_name: &str, last_name: &str) -> String {
    let suffix = rand::rng().random_range(0..HANDLE_SUFFIX_RANGE);
    display_handle_with_suffix(first_name, last_name, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunk_prefix_rewritten() {
        assert_eq!(normalize_phone("05551234567"), "+905551234567");
    }

    #[test]
    fn international_passes_through() {
        assert_eq!(normalize_phone("+905551234567"), "+905551234567");
    }

    #[test]
    fn bare_national_number_gets_prefix() {
        assert_eq!(normalize_phone("5551234567"), "+905551234567");
    }

    #[test]
    fn slug_lowercases_and_strips_punctuation() {
        assert_eq!(name_slug("Ali"), "ali");
        assert_eq!(name_slug("Ayşe-Nur"), "ayşenur");
        assert_eq!(name_slug("O'Brien Jr."), "obrienjr");
    }

    #[test]
    fn handle_is_deterministic_for_fixed_suffix() {
        assert_eq!(display_handle_with_suffix("Ali", "Yılmaz", 42), "aliyılmaz42");
    }

    #[test]
    fn generated_handle_has_name_prefix_and_bounded_suffix() {
        let handle = generate_display_handle("Ali", "Veli");
        let suffix = handle.strip_prefix("aliveli").expect("slug prefix");
        let n: u32 = suffix.parse().expect("numeric suffix");
        assert!(n < HANDLE_SUFFIX_RANGE);
    }
}
