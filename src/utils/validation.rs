//! Input validation for user-submitted data

use crate::utils::error::{ConsoleError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

static PERMISSION_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.:-]+$").expect("permission id regex is valid"));

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validators for user-submitted fields
pub struct DataValidator;

impl DataValidator {
    /// Validate an email address
    pub fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "Email cannot be empty".to_string(),
            ));
        }

        if !EMAIL_REGEX.is_match(email) {
            return Err(ConsoleError::Validation(
                "Email address is not valid".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a new password
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(ConsoleError::Validation(
                "New password must be at least 8 characters long".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a new password together with its confirmation
    pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<()> {
        Self::validate_password(password)?;

        if password != confirmation {
            return Err(ConsoleError::Validation(
                "Passwords do not match".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a display name
    pub fn validate_display_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ConsoleError::Validation("Name cannot be empty".to_string()));
        }

        if name.len() > 100 {
            return Err(ConsoleError::Validation(
                "Name cannot exceed 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a permission identifier
    pub fn validate_permission_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "Permission ID cannot be empty".to_string(),
            ));
        }

        if id.len() > 64 {
            return Err(ConsoleError::Validation(
                "Permission ID cannot exceed 64 characters".to_string(),
            ));
        }

        if !PERMISSION_ID_REGEX.is_match(id) {
            return Err(ConsoleError::Validation(
                "Permission ID can only contain letters, numbers, and '_', '.', ':', '-'"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a permission display name
    pub fn validate_permission_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ConsoleError::Validation(
                "Permission name cannot be empty".to_string(),
            ));
        }

        if name.len() > 100 {
            return Err(ConsoleError::Validation(
                "Permission name cannot exceed 100 characters".to_string(),
            ));
        }

        Ok(())
    }
}
