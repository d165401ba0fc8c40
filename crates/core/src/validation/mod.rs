//! Pure input validators.
//!
//! Every validator is a pure function: same input, same output, no I/O.
//! Validators return typed results; [`ValidationResult`] is the flattened
//! `{ isValid, error }` shape handed to form views.
//!
//! Email validation lives with the [`Email`](crate::Email) type.

pub mod image;
pub mod password;
pub mod phone;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub use image::{
    ImageError, ImageFile, MAX_IMAGE_SIZE, image_validation_result, to_data_url, validate_image,
};
pub use password::{
    PasswordError, PasswordReport, PasswordStrength, StrengthMeter, is_valid_password,
    password_strength, validate_password,
};
pub use phone::{
    PhoneError, PhoneNumber, PhoneType, clean_phone_number, format_phone_number, is_valid_mobile,
    phone_number_type, phone_validation_result, validate_phone_number,
};

/// Outcome of validating one form field.
///
/// Invariant: `is_valid` implies `error` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: String,
}

impl ValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            error: String::new(),
        }
    }

    /// A failing result with a user-facing message.
    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: error.into(),
        }
    }

    /// Flatten a typed validation result.
    #[must_use]
    pub fn from_result<T, E: Display>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::valid(),
            Err(e) => Self::invalid(e.to_string()),
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Result<(), String> = Ok(());
        assert_eq!(ValidationResult::from_result(&ok), ValidationResult::valid());

        let err: Result<(), String> = Err("Phone number is required".to_string());
        let result = ValidationResult::from_result(&err);
        assert!(!result.is_valid);
        assert_eq!(result.error, "Phone number is required");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ValidationResult::invalid("nope")).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"isValid": false, "error": "nope"}));
    }
}
