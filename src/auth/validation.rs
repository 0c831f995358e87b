use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AuthError;

pub const SIGNUP_FIELDS_REQUIRED: &str = "Username, email, and password are required.";
pub const USERNAME_FORMAT: &str =
    "Username must be 3-30 characters and use only letters, numbers, and underscores.";
pub const EMAIL_FORMAT: &str = "Enter a valid email address.";
pub const LOGIN_FIELDS_REQUIRED: &str = "Username and password are required.";
pub const LOGIN_USERNAME_FORMAT: &str = "Enter a valid username.";

const MAX_EMAIL_LEN: usize = 320;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{3,30}$").unwrap();
    // dot-atom of RFC 5322 atext
    static ref EMAIL_LOCAL_RE: Regex = Regex::new(
        r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*$"
    )
    .unwrap();
    static ref EMAIL_DOMAIN_RE: Regex = Regex::new(
        r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9]{1,59})$"
    )
    .unwrap();
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if !EMAIL_LOCAL_RE.is_match(local) {
        return false;
    }
    is_valid_email_domain(domain)
}

fn is_valid_email_domain(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") || EMAIL_DOMAIN_RE.is_match(domain) {
        return true;
    }
    // internationalized domains are checked in their punycode form
    match idna::domain_to_ascii(domain) {
        Ok(ascii) => EMAIL_DOMAIN_RE.is_match(&ascii),
        Err(_) => false,
    }
}

/// Fields of a signup request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup<'a> {
    pub full_name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Fails fast with the first problem found. An absent or empty full name
/// falls back to the username.
pub fn validate_signup<'a>(
    full_name: Option<&'a str>,
    username: Option<&'a str>,
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<ValidSignup<'a>, AuthError> {
    let (username, email, password) = match (non_empty(username), non_empty(email), non_empty(password)) {
        (Some(u), Some(e), Some(p)) => (u, e, p),
        _ => return Err(AuthError::validation(SIGNUP_FIELDS_REQUIRED)),
    };
    if !is_valid_username(username) {
        return Err(AuthError::validation(USERNAME_FORMAT));
    }
    if !is_valid_email(email) {
        return Err(AuthError::validation(EMAIL_FORMAT));
    }
    Ok(ValidSignup {
        full_name: non_empty(full_name).unwrap_or(username),
        username,
        email,
        password,
    })
}

/// Returns `(username, password)`.
pub fn validate_login<'a>(
    username: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), AuthError> {
    let (username, password) = match (non_empty(username), non_empty(password)) {
        (Some(u), Some(p)) => (u, p),
        _ => return Err(AuthError::validation(LOGIN_FIELDS_REQUIRED)),
    };
    if !is_valid_username(username) {
        return Err(AuthError::validation(LOGIN_USERNAME_FORMAT));
    }
    Ok((username, password))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
