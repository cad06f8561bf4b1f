//! Input validation utilities for the Stratum API
//!
//! This module provides validation functions for fields that appear in
//! account-facing requests.

use validator::ValidationError;

/// Maximum length for email addresses
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for an account's full name
pub const MAX_FULL_NAME_LENGTH: usize = 128;

/// Maximum length for an API token name
pub const MAX_TOKEN_NAME_LENGTH: usize = 64;

/// Maximum length for a notification subject
pub const MAX_SUBJECT_LENGTH: usize = 256;

/// Maximum length for a notification message
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Maximum length for passwords (bcrypt input limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Validate email format
///
/// Emails must:
/// - Not be empty
/// - Not exceed MAX_EMAIL_LENGTH characters
/// - Contain exactly one '@' with a non-empty local part and a domain
///   containing a dot
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email_empty"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::new("email_too_long"));
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(ValidationError::new("email_invalid_format"));
    }
    Ok(())
}

/// Validate an account's full name
pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if full_name.trim().is_empty() {
        return Err(ValidationError::new("full_name_empty"));
    }
    if full_name.len() > MAX_FULL_NAME_LENGTH {
        return Err(ValidationError::new("full_name_too_long"));
    }
    Ok(())
}

/// Validate an API token name
pub fn validate_token_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("token_name_empty"));
    }
    if name.len() > MAX_TOKEN_NAME_LENGTH {
        return Err(ValidationError::new("token_name_too_long"));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_' || c == ' ')
    {
        return Err(ValidationError::new("token_name_invalid_chars"));
    }
    Ok(())
}

/// Validate a notification subject
pub fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.trim().is_empty() {
        return Err(ValidationError::new("subject_empty"));
    }
    if subject.len() > MAX_SUBJECT_LENGTH {
        return Err(ValidationError::new("subject_too_long"));
    }
    Ok(())
}

/// Validate a notification message body
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.len() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::new("message_too_long"));
    }
    Ok(())
}

/// Validate password (basic length check, not security policy)
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("password_empty"));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_long"));
    }
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane.doe@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@nodot").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Jane Doe").is_ok());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"a".repeat(MAX_FULL_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_token_name() {
        assert!(validate_token_name("ci-pipeline_01").is_ok());
        assert!(validate_token_name("backup token").is_ok());
        assert!(validate_token_name("").is_err());
        assert!(validate_token_name("bad/name").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_subject_and_message() {
        assert!(validate_subject("Maintenance window").is_ok());
        assert!(validate_subject(" ").is_err());
        assert!(validate_message(&"m".repeat(MAX_MESSAGE_LENGTH)).is_ok());
        assert!(validate_message(&"m".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }
}
