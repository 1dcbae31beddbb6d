//! Input normalization and the permissive email/username check.

use regex::Regex;

/// Usernames accepted without an `@`. They match the demo accounts.
const BARE_USERNAMES: [&str; 2] = ["admin", "cliente"];

/// Normalize an email or username for lookup/uniqueness checks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Accepts the demo usernames or anything shaped like `text@text.text`.
///
/// The shape check is deliberately loose (no anchors, any non-space text),
/// matching what the forms have always accepted.
pub fn valid_email_or_username(email: &str) -> bool {
    let normalized = normalize_email(email);
    if normalized.is_empty() {
        return false;
    }
    if BARE_USERNAMES.contains(&normalized.as_str()) {
        return true;
    }
    Regex::new(r"\S+@\S+\.\S+").is_ok_and(|regex| regex.is_match(&normalized))
}
