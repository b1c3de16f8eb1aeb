//! Flat, per-input-shape validation.
//!
//! Each inbound payload gets one explicit validation function returning
//! the full list of field-level errors, independent of any entity type.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const USERNAME_MAX_LEN: usize = 150;
pub const NAME_MAX_LEN: usize = 30;
pub const BIO_MAX_LEN: usize = 200;
pub const WEBSITE_URL_MAX_LEN: usize = 100;
pub const POST_BODY_MAX_LEN: usize = 500;
pub const COMMENT_BODY_MAX_LEN: usize = 5000;
pub const STORY_CONTENT_MAX_LEN: usize = 120;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulated validation failures for one input shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut v = Self::new();
        v.push(field, message);
        v
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Ok when no errors were accumulated.
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
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

/// Payload for account registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub website_url: Option<String>,
}

/// Payload for account edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub website_url: Option<String>,
}

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9_.]+$").expect("valid username regex"))
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+$").expect("valid name regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn check_username(v: &mut ValidationErrors, username: &str) {
    if username.is_empty() {
        v.push("username", "must not be empty");
    } else if username.chars().count() > USERNAME_MAX_LEN {
        v.push("username", "150 characters or fewer");
    } else if !username_re().is_match(username) {
        v.push("username", "lowercase letters, numbers and _/. only");
    }
}

fn check_email(v: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        v.push("email", "must not be empty");
    } else if !email_re().is_match(email) {
        v.push("email", "must be a valid email address");
    }
}

fn check_name(v: &mut ValidationErrors, field: &str, name: &str) {
    if name.is_empty() {
        v.push(field, "must not be empty");
    } else if name.chars().count() > NAME_MAX_LEN {
        v.push(field, "30 characters or fewer");
    } else if !name_re().is_match(name) {
        v.push(field, "letters only");
    }
}

fn check_profile_extras(v: &mut ValidationErrors, bio: Option<&str>, website_url: Option<&str>) {
    if let Some(bio) = bio {
        if bio.chars().count() > BIO_MAX_LEN {
            v.push("bio", "200 characters or fewer");
        }
    }
    if let Some(url) = website_url {
        if url.chars().count() > WEBSITE_URL_MAX_LEN {
            v.push("website_url", "100 characters or fewer");
        } else if !url.starts_with("https://") {
            v.push("website_url", "must start with https://");
        }
    }
}

pub fn validate_new_account(account: &NewAccount) -> Result<(), ValidationErrors> {
    let mut v = ValidationErrors::new();
    check_username(&mut v, &account.username);
    check_email(&mut v, &account.email);
    check_name(&mut v, "first_name", &account.first_name);
    check_name(&mut v, "last_name", &account.last_name);
    check_profile_extras(&mut v, account.bio.as_deref(), account.website_url.as_deref());
    v.into_result()
}

pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), ValidationErrors> {
    let mut v = ValidationErrors::new();
    check_username(&mut v, &update.username);
    check_email(&mut v, &update.email);
    check_name(&mut v, "first_name", &update.first_name);
    check_name(&mut v, "last_name", &update.last_name);
    check_profile_extras(&mut v, update.bio.as_deref(), update.website_url.as_deref());
    v.into_result()
}

fn check_body(field: &str, body: &str, max_len: usize, limit_msg: &str) -> Result<(), ValidationErrors> {
    let mut v = ValidationErrors::new();
    if body.trim().is_empty() {
        v.push(field, "must not be empty");
    } else if body.chars().count() > max_len {
        v.push(field, limit_msg);
    }
    v.into_result()
}

pub fn validate_post_body(body: &str) -> Result<(), ValidationErrors> {
    check_body("body", body, POST_BODY_MAX_LEN, "500 characters or fewer")
}

pub fn validate_comment_body(body: &str) -> Result<(), ValidationErrors> {
    check_body("body", body, COMMENT_BODY_MAX_LEN, "5000 characters or fewer")
}

pub fn validate_story_content(content: &str) -> Result<(), ValidationErrors> {
    check_body(
        "content",
        content,
        STORY_CONTENT_MAX_LEN,
        "120 characters or fewer",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> NewAccount {
        NewAccount {
            username: "ada_lovelace".into(),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            bio: None,
            website_url: None,
        }
    }

    #[test]
    fn valid_account_passes() {
        assert!(validate_new_account(&account()).is_ok());
    }

    #[test]
    fn uppercase_username_rejected() {
        let mut a = account();
        a.username = "Ada".into();
        let errs = validate_new_account(&a).unwrap_err();
        assert_eq!(errs.errors[0].field, "username");
    }

    #[test]
    fn multiple_failures_are_accumulated() {
        let mut a = account();
        a.username = "".into();
        a.email = "not-an-email".into();
        a.first_name = "Ada99".into();
        let errs = validate_new_account(&a).unwrap_err();
        let fields: Vec<&str> = errs.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "email", "first_name"]);
    }

    #[test]
    fn website_url_must_be_https() {
        let mut a = account();
        a.website_url = Some("http://example.com".into());
        let errs = validate_new_account(&a).unwrap_err();
        assert_eq!(errs.errors[0].field, "website_url");
    }

    #[test]
    fn empty_post_body_rejected() {
        assert!(validate_post_body("   ").is_err());
    }

    #[test]
    fn post_body_length_limit() {
        assert!(validate_post_body(&"x".repeat(500)).is_ok());
        assert!(validate_post_body(&"x".repeat(501)).is_err());
    }

    #[test]
    fn story_content_length_limit() {
        assert!(validate_story_content(&"x".repeat(120)).is_ok());
        assert!(validate_story_content(&"x".repeat(121)).is_err());
    }

    #[test]
    fn comment_body_length_limit() {
        assert!(validate_comment_body(&"x".repeat(5000)).is_ok());
        assert!(validate_comment_body(&"x".repeat(5001)).is_err());
    }

    #[test]
    fn display_joins_field_errors() {
        let mut v = ValidationErrors::new();
        v.push("body", "must not be empty");
        v.push("content", "120 characters or fewer");
        assert_eq!(
            v.to_string(),
            "body: must not be empty; content: 120 characters or fewer"
        );
    }
}
