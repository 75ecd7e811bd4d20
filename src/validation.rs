use crate::models::user::UserRequest;
use once_cell::sync::Lazy;
use regex::Regex;

// Dot-atom local part (no leading, trailing or doubled dots) and one or more
// dotted domain labels. Letters and digits may be non-ASCII.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[\p{L}\p{N}](?:[\p{L}\p{M}\p{N}-]{0,61}[\p{L}\p{M}\p{N}])?",
        r"(?:\.[\p{L}\p{N}](?:[\p{L}\p{M}\p{N}-]{0,61}[\p{L}\p{M}\p{N}])?)+\.?$",
    ))
    .unwrap()
});

const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(email)
}

/// Check the fields of an inbound user body.
pub fn validate_user_request(request: &UserRequest) -> Result<(), ValidationError> {
    if request.first_name.trim().is_empty() {
        return Err(ValidationError::Required("first_name"));
    }
    if request.last_name.trim().is_empty() {
        return Err(ValidationError::Required("last_name"));
    }
    if request.email.trim().is_empty() {
        return Err(ValidationError::Required("email"));
    }
    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail(request.email.clone()));
    }
    Ok(())
}

pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required("id"));
    }
    Ok(())
}
