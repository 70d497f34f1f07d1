// src/utils/validation.rs
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 6;

lazy_static::lazy_static! {
    // local part, '@', a domain containing a dot, non-whitespace final segment
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validates email shape. This is a format check only, nothing is resolved.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_REGEX.is_match(email)
}

/// Passwords must be non-empty and at least `MIN_PASSWORD_LENGTH` characters.
pub fn is_valid_password(password: &str) -> bool {
    !password.is_empty() && password.chars().count() >= MIN_PASSWORD_LENGTH
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
