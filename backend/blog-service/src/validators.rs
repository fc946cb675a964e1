//! Input validation utilities for blog-service

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::error::{BlogError, FieldMessage, Result};

pub const MIN_PASSWORD_LEN: usize = 5;
pub const MIN_TITLE_LEN: usize = 5;
pub const MIN_CONTENT_LEN: usize = 5;
/// Matches `users.name VARCHAR(255)`
pub const MAX_NAME_LEN: usize = 255;

// Hardcoded pattern, compiled once
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Password must be at least `MIN_PASSWORD_LEN` characters
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Display name: non-blank after trimming, at most `MAX_NAME_LEN` characters
pub fn validate_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    len > 0 && len <= MAX_NAME_LEN
}

/// Non-blank text of at least `min` characters, ignoring surrounding whitespace
pub fn validate_text(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Check a post's title and content, collecting every failure
pub fn validate_post_input(title: &str, content: &str) -> Result<()> {
    let mut errors = Vec::new();

    if !validate_text(title, MIN_TITLE_LEN) {
        errors.push(FieldMessage::new("Title is invalid."));
    }
    if !validate_text(content, MIN_CONTENT_LEN) {
        errors.push(FieldMessage::new("Content is invalid."));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(BlogError::invalid_input(errors))
    }
}

/// Parse a post id supplied by the caller
pub fn parse_post_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim())
        .map_err(|_| BlogError::invalid_input(vec![FieldMessage::new("Invalid Post ID.")]))
}
