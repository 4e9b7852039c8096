use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A single failed constraint, keyed by the wire name of the offending field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Character-count check used by the length rules (2-500 style constraints).
pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// International phone format: `+` followed by 10-15 digits.
pub fn is_valid_phone(value: &str) -> bool {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE
        .get_or_init(|| Regex::new(r"^\+\d{10,15}$").expect("phone pattern is valid"))
        .is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"))
        .is_match(value)
}
