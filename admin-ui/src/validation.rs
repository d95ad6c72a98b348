//! Form validation
//!
//! Runs before any request is sent. Each check returns the message for the
//! first problem found with its field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Field name to message; empty when the form is valid
pub type FieldErrors = BTreeMap<&'static str, String>;

fn put(errors: &mut FieldErrors, field: &'static str, result: Result<(), String>) {
    if let Err(message) = result {
        errors.entry(field).or_insert(message);
    }
}

pub fn check_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        Err("Email is required".into())
    } else if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("Enter a valid email address".into())
    }
}

pub fn check_password(password: &str) -> Result<(), String> {
    if password.trim().is_empty() {
        Err("Password is required".into())
    } else if password.trim().chars().count() < MIN_PASSWORD_LEN {
        Err(format!("Password must be at least {} characters", MIN_PASSWORD_LEN))
    } else {
        Ok(())
    }
}

pub fn check_confirmation(password: &str, confirm: &str) -> Result<(), String> {
    if password == confirm {
        Ok(())
    } else {
        Err("Passwords do not match".into())
    }
}

pub fn check_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        Err("Name is required".into())
    } else if name.chars().count() < 2 {
        Err("Name must be at least 2 characters".into())
    } else if name.chars().any(|c| c.is_ascii_digit()) {
        Err("Name cannot contain numbers".into())
    } else {
        Ok(())
    }
}

pub fn check_phone(phone: &str) -> Result<(), String> {
    if PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        Err("Phone number must be exactly 10 digits".into())
    }
}

/// Absolute `http` or `https` URL
pub fn check_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("URL is required".into());
    }
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err("Enter a full http(s) URL".into()),
    }
}

pub fn check_required(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

pub fn check_rating(rating: u8) -> Result<(), String> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err("Rating must be between 1 and 5".into())
    }
}

/// `dd/mm/yyyy`
pub fn check_date(date: &str) -> Result<(), String> {
    chrono::NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y")
        .map(|_| ())
        .map_err(|_| "Date must be dd/mm/yyyy".to_string())
}

pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    put(&mut errors, "email", check_email(email));
    put(&mut errors, "password", check_password(password));
    errors
}

pub fn validate_registration(name: &str, email: &str, phone: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    put(&mut errors, "name", check_name(name));
    put(&mut errors, "email", check_email(email));
    put(&mut errors, "phone", check_phone(phone));
    put(&mut errors, "password", check_password(password));
    errors
}

pub fn validate_new_password(password: &str, confirm: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    put(&mut errors, "password", check_password(password));
    put(&mut errors, "confirm", check_confirmation(password, confirm));
    errors
}

pub fn validate_review(name: &str, game: &str, comment: &str, rating: u8, date: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    put(&mut errors, "name", check_required("Name", name));
    put(&mut errors, "game", check_required("Game", game));
    put(&mut errors, "comment", check_required("Comment", comment));
    put(&mut errors, "rating", check_rating(rating));
    put(&mut errors, "date", check_date(date));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(check_email("a@b.com").is_ok());
        assert!(check_email("  a@b.com ").is_ok());
        assert!(check_email("a@b").is_err());
        assert!(check_email("@b.com").is_err());
        assert!(check_email("a b@c.com").is_err());
        assert!(check_email("a@.com").is_err());
        assert!(check_email("a@b.").is_err());
        assert!(check_email("@a@b.c").is_ok());
    }

    #[test]
    fn test_login_collects_both_fields() {
        let errors = validate_login("nope", "123");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["password"], "Password must be at least 6 characters");
        assert!(validate_login("a@b.com", "secret1").is_empty());
    }

    #[test]
    fn test_registration_rules() {
        let errors = validate_registration("J0", "a@b.com", "12345", "secret1");
        assert_eq!(errors["name"], "Name cannot contain numbers");
        assert_eq!(errors["phone"], "Phone number must be exactly 10 digits");
        assert!(validate_registration("Jo", "a@b.com", "0123456789", "secret1").is_empty());
        assert!(check_phone("١٢٣٤٥٦٧٨٩٠").is_err());
    }

    #[test]
    fn test_mismatched_confirmation() {
        let errors = validate_new_password("secret1", "secret2");
        assert_eq!(errors["confirm"], "Passwords do not match");
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_review_rules() {
        let errors = validate_review("Jo", "", "Fun", 6, "2024-02-01");
        assert_eq!(errors["game"], "Game is required");
        assert!(errors.contains_key("rating"));
        assert!(errors.contains_key("date"));
        assert!(validate_review("Jo", "Skyfall", "Fun", 5, "01/02/2024").is_empty());
    }

    #[test]
    fn test_url_rules() {
        assert!(check_url("https://play.google.com/store").is_ok());
        assert!(check_url("ftp://x.test").is_err());
        assert!(check_url("https://").is_err());
        assert!(check_url("play.google.com").is_err());
        assert!(check_url("https://exa mple.com").is_err());
    }
}
