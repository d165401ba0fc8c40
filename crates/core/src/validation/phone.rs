//! Phone number validation for the single supported numbering scheme.
//!
//! Input is reduced to its digits first, so `0300-1234567`,
//! `(0300) 123 4567` and `03001234567` are the same number.
//!
//! - 11 digits starting with `03` and a whitelisted prefix: mobile,
//!   formatted `DDDD-DDD-DDDD`
//! - exactly 10 digits: landline, formatted `DDD-DDD-DDDD`
//! - anything else is rejected

use std::fmt;

use super::ValidationResult;

/// Three-digit mobile operator prefixes.
const MOBILE_PREFIXES: &[&str] = &[
    "030", "031", "032", "033", "034", "035", "036", "037", "038", "039",
];

/// Reasons a phone number is rejected. `Display` is the user-facing message.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number is required")]
    Required,
    #[error("Please enter a valid Pakistani mobile number (03XX-XXX-XXXX)")]
    InvalidMobilePrefix,
    #[error("Phone number is too short. Please enter at least 10 digits")]
    TooShort,
    #[error("Phone number is too long. Please enter maximum 11 digits")]
    TooLong,
    #[error("Please enter a valid phone number (e.g., 03XX-XXX-XXXX)")]
    InvalidFormat,
}

/// Kind of number, judged from the digit count and prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneType {
    Mobile,
    Landline,
    Unknown,
}

/// An accepted phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    digits: String,
    kind: PhoneType,
}

impl PhoneNumber {
    /// The bare digits.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Mobile or landline.
    #[must_use]
    pub const fn kind(&self) -> PhoneType {
        self.kind
    }

    /// Canonical dashed form.
    #[must_use]
    pub fn formatted(&self) -> String {
        group_digits(&self.digits).unwrap_or_else(|| self.digits.clone())
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Strip every non-digit character.
#[must_use]
pub fn clean_phone_number(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Validate a phone number.
///
/// # Errors
///
/// Returns [`PhoneError`] describing why the number was rejected.
pub fn validate_phone_number(phone: &str) -> Result<PhoneNumber, PhoneError> {
    if phone.trim().is_empty() {
        return Err(PhoneError::Required);
    }

    let digits = clean_phone_number(phone);
    let len = digits.len();

    if len == 11 && digits.starts_with("03") {
        let prefix = digits.get(..3).unwrap_or_default();
        if MOBILE_PREFIXES.contains(&prefix) {
            return Ok(PhoneNumber {
                digits,
                kind: PhoneType::Mobile,
            });
        }
        return Err(PhoneError::InvalidMobilePrefix);
    }
    if len == 10 {
        return Ok(PhoneNumber {
            digits,
            kind: PhoneType::Landline,
        });
    }
    if len < 10 {
        return Err(PhoneError::TooShort);
    }
    if len > 11 {
        return Err(PhoneError::TooLong);
    }
    Err(PhoneError::InvalidFormat)
}

/// Validate a phone number for display in a form.
#[must_use]
pub fn phone_validation_result(phone: &str) -> ValidationResult {
    ValidationResult::from_result(&validate_phone_number(phone))
}

/// Format a phone number as the user types.
///
/// Inputs with 10 or 11 digits are dashed; anything else is returned
/// unchanged so partial input is not mangled.
#[must_use]
pub fn format_phone_number(phone: &str) -> String {
    group_digits(&clean_phone_number(phone)).unwrap_or_else(|| phone.to_string())
}

/// Returns `true` for 11-digit numbers starting with `03`.
#[must_use]
pub fn is_valid_mobile(phone: &str) -> bool {
    phone_number_type(phone) == PhoneType::Mobile
}

/// Classify a phone number without validating it.
#[must_use]
pub fn phone_number_type(phone: &str) -> PhoneType {
    let digits = clean_phone_number(phone);
    match digits.len() {
        11 if digits.starts_with("03") => PhoneType::Mobile,
        10 => PhoneType::Landline,
        _ => PhoneType::Unknown,
    }
}

fn group_digits(digits: &str) -> Option<String> {
    let (a, b) = match digits.len() {
        11 => (4, 7),
        10 => (3, 6),
        _ => return None,
    };
    Some(format!(
        "{}-{}-{}",
        digits.get(..a)?,
        digits.get(a..b)?,
        digits.get(b..)?
    ))
}
