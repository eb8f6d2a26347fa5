//! Minimum password policy for new accounts.

use ssahub_core::config::auth::AuthConfig;
use ssahub_core::error::AppError;

/// Rejects passwords that are too short or lack letters or digits.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(AppError::validation(
                "Password must contain both letters and digits",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy() {
        let v = PasswordValidator::new(&AuthConfig::default());
        assert!(v.validate("abc123").is_err());
        assert!(v.validate("abcdefghij").is_err());
        assert!(v.validate("1234567890").is_err());
        assert!(v.validate("library2026").is_ok());
    }
}
