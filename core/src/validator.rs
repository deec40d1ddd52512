//! Pre-flight input checks.
//!
//! Each function inspects a single value and returns `ValidationError` on
//! the first rule it breaks. They run before any request is built, so a
//! failure here guarantees nothing went over the wire.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

pub const MAX_URL_LEN: usize = 2048;
pub const CUSTOM_CODE_MIN: usize = 3;
pub const CUSTOM_CODE_MAX: usize = 20;

// http(s) only, a host whose last label is 1-6 chars, optional path/query/fragment.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .expect("URL pattern is a valid regex")
});

/// Reject anything that is not an absolute http(s) URL of sane length.
pub fn validate_url(candidate: &str) -> Result<(), ValidationError> {
    if candidate.is_empty() {
        return Err(ValidationError::new("URL is required and must be a string"));
    }
    if candidate.chars().count() > MAX_URL_LEN {
        return Err(ValidationError::new(format!(
            "URL is too long (maximum {MAX_URL_LEN} characters)"
        )));
    }
    if !URL_PATTERN.is_match(candidate) {
        return Err(ValidationError::new("Invalid URL format"));
    }
    Ok(())
}

/// A custom slug is 3-20 characters of `[A-Za-z0-9_-]`.
pub fn validate_custom_code(candidate: &str) -> Result<(), ValidationError> {
    let len = candidate.chars().count();
    if !(CUSTOM_CODE_MIN..=CUSTOM_CODE_MAX).contains(&len) {
        return Err(ValidationError::new(format!(
            "Custom code must be between {CUSTOM_CODE_MIN} and {CUSTOM_CODE_MAX} characters"
        )));
    }
    if !candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::new(
            "Custom code can only contain letters, numbers, underscores, and hyphens",
        ));
    }
    Ok(())
}

/// Identifiers (slugs, hashes) must contain something besides whitespace.
pub fn validate_id(candidate: &str) -> Result<(), ValidationError> {
    if candidate.trim().is_empty() {
        return Err(ValidationError::new("ID cannot be empty"));
    }
    Ok(())
}
