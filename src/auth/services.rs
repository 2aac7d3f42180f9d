use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginRequest, SignupRequest};
use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) const MISSING_FIELDS: &str =
    "All fields are required (fullName, email, password, role)";
pub(crate) const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A signup request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

// Blank strings count as missing.
fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

// Passwords are taken verbatim; only an empty value is missing.
fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Password length in UTF-16 code units, as browsers count it.
pub(crate) fn password_len(password: &str) -> usize {
    password.encode_utf16().count()
}

pub fn validate_signup(req: SignupRequest) -> Result<ValidSignup, ApiError> {
    let (Some(full_name), Some(email), Some(password), Some(role)) = (
        present(req.full_name),
        present(req.email),
        non_empty(req.password),
        present(req.role),
    ) else {
        return Err(ApiError::validation(MISSING_FIELDS));
    };

    if password_len(&password) < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(PASSWORD_TOO_SHORT));
    }

    let email = normalize_email(&email);
    if !is_valid_email(&email) {
        return Err(ApiError::validation("Invalid email"));
    }

    Ok(ValidSignup {
        full_name: full_name.trim().to_string(),
        email,
        password,
        role: role.trim().to_string(),
    })
}

pub fn validate_login(req: LoginRequest) -> Result<(String, String), ApiError> {
    match (present(req.email), non_empty(req.password)) {
        (Some(email), Some(password)) => Ok((normalize_email(&email), password)),
        _ => Err(ApiError::validation("Email and password are required")),
    }
}
