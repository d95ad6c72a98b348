//! Form Validation
//!
//! Client-side checks run before anything is sent to the API. Failures are
//! collected per field so forms can show every problem at once.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Field name to message, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first message recorded for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn check_email(errors: &mut ValidationErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.add("email", "Enter a valid email address");
    }
}

pub fn check_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.trim().chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            field,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}

pub fn check_confirmation(
    errors: &mut ValidationErrors,
    field: &'static str,
    password: &str,
    confirmation: &str,
) {
    if password != confirmation {
        errors.add(field, "Passwords do not match");
    }
}

pub fn check_name(errors: &mut ValidationErrors, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    } else if name.chars().count() < 2 {
        errors.add("name", "Name must be at least 2 characters");
    } else if name.chars().any(|c| c.is_ascii_digit()) {
        errors.add("name", "Name should not contain numbers");
    }
}

pub fn check_phone(errors: &mut ValidationErrors, phone: &str) {
    let phone = phone.trim();
    if phone.is_empty() {
        errors.add("phone", "Phone no is required");
    } else if !PHONE_RE.is_match(phone) {
        errors.add("phone", "Enter a valid phone no");
    }
}

pub fn check_required(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", capitalize(field)));
    }
}

/// Absolute http(s) URL
pub fn check_url(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    match url::Url::parse(value.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => errors.add(field, "Enter a complete URL starting with http:// or https://"),
    }
}

/// Star rating between 1 and 5 inclusive
pub fn check_rating(errors: &mut ValidationErrors, rating: u8) {
    if !(1..=5).contains(&rating) {
        errors.add("rating", "Rating must be between 1 and 5");
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
