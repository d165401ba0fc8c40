//! Password validation and strength scoring.
//!
//! Validity and strength are independent: a password is valid when it has
//! lowercase, uppercase and digits and is 8-128 characters long, whatever
//! its score. The score (0-7) only drives the strength label and the
//! suggestions shown beneath the field.

use serde::{Deserialize, Serialize};

use super::ValidationResult;

/// Minimum accepted password length.
pub const MIN_LENGTH: usize = 8;

/// Maximum accepted password length.
pub const MAX_LENGTH: usize = 128;

/// Highest possible strength score.
pub const MAX_SCORE: u8 = 7;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?~`";

/// Case-insensitive substrings that mark a password as guessable.
const COMMON_PATTERNS: &[&str] = &[
    "123456",
    "password",
    "qwerty",
    "admin",
    "welcome",
    "pakistan",
    "karachi",
    "lahore",
    "islamabad",
];

/// Reasons a password is rejected. `Display` is the user-facing message.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is required")]
    Required,
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password is too long (max 128 characters)")]
    TooLong,
    #[error("Password must contain uppercase, lowercase, and numbers (minimum 8 characters)")]
    MissingCharacterClasses,
}

/// Strength bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStrength {
    #[default]
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// `score >= 6` is strong, `score >= 4` medium, anything lower weak.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 6 {
            Self::Strong
        } else if score >= 4 {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    /// Capitalized label for the strength meter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Medium => write!(f, "medium"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Full result of [`validate_password`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordReport {
    /// The rule violated, if any.
    pub error: Option<PasswordError>,
    /// Strength score in `0..=7`.
    pub score: u8,
    pub strength: PasswordStrength,
    /// Improvement hints, in a stable order.
    pub suggestions: Vec<String>,
}

impl PasswordReport {
    /// Returns `true` if the password is acceptable.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Flatten to the `{ isValid, error }` form shape.
    #[must_use]
    pub fn to_validation_result(&self) -> ValidationResult {
        self.error
            .map_or_else(ValidationResult::valid, |e| ValidationResult::invalid(e.to_string()))
    }

    fn rejected(error: PasswordError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Validate a password and score its strength.
#[must_use]
pub fn validate_password(password: &str) -> PasswordReport {
    if password.is_empty() {
        return PasswordReport::rejected(PasswordError::Required);
    }

    let chars: Vec<char> = password.chars().collect();
    let len = chars.len();

    if len < MIN_LENGTH {
        let mut report = PasswordReport::rejected(PasswordError::TooShort);
        report.suggestions.push("Use at least 8 characters".to_string());
        return report;
    }
    if len > MAX_LENGTH {
        return PasswordReport::rejected(PasswordError::TooLong);
    }

    let has_lower = chars.iter().any(char::is_ascii_lowercase);
    let has_upper = chars.iter().any(char::is_ascii_uppercase);
    let has_digit = chars.iter().any(char::is_ascii_digit);
    let has_special = chars.iter().any(|c| SPECIAL_CHARS.contains(*c));

    let score: u8 = [
        len >= MIN_LENGTH,
        len >= 12,
        len >= 16,
        has_lower,
        has_upper,
        has_digit,
        has_special,
    ]
    .into_iter()
    .map(u8::from)
    .sum();

    let mut suggestions = Vec::new();
    if !has_lower {
        suggestions.push("Add lowercase letters (a-z)".to_string());
    }
    if !has_upper {
        suggestions.push("Add uppercase letters (A-Z)".to_string());
    }
    if !has_digit {
        suggestions.push("Add numbers (0-9)".to_string());
    }
    if !has_special {
        suggestions.push("Add special characters (!@#$%^&*)".to_string());
    }
    if len < 12 {
        suggestions.push("Use 12+ characters for better security".to_string());
    }
    let lower = password.to_lowercase();
    if COMMON_PATTERNS.iter().any(|pattern| lower.contains(pattern)) {
        suggestions.push("Avoid common words and patterns".to_string());
    }
    if has_repeated_run(&chars) {
        suggestions.push("Avoid repeating the same character".to_string());
    }

    let error = (!(has_lower && has_upper && has_digit))
        .then_some(PasswordError::MissingCharacterClasses);

    PasswordReport {
        error,
        score,
        strength: PasswordStrength::from_score(score),
        suggestions,
    }
}

/// Returns `true` if the password is acceptable.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    validate_password(password).is_valid()
}

/// Three or more identical characters in a row.
fn has_repeated_run(chars: &[char]) -> bool {
    chars.windows(3).any(|w| matches!(w, [a, b, c] if a == b && b == c))
}

/// Data for the strength meter under the password field.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthMeter {
    pub strength: PasswordStrength,
    pub label: &'static str,
    pub score: u8,
    /// Fill level in `0.0..=100.0`.
    pub percentage: f64,
    pub suggestions: Vec<String>,
}

/// Build the strength meter for a password.
#[must_use]
pub fn password_strength(password: &str) -> StrengthMeter {
    let report = validate_password(password);
    let percentage = (f64::from(report.score) / f64::from(MAX_SCORE) * 100.0).min(100.0);
    StrengthMeter {
        strength: report.strength,
        label: report.strength.label(),
        score: report.score,
        percentage,
        suggestions: report.suggestions,
    }
}
