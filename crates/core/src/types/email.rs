//! Email address type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

/// `local@domain` where the domain has at least one dot-separated label
/// after the first one. Labels are 1-63 alphanumerics/hyphens and may not
/// start or end with a hyphen.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("Invalid regex")
});

/// Errors that can occur when parsing an [`Email`].
///
/// The `Display` output is the message shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing was entered.
    #[error("Email is required")]
    Required,
    /// Only whitespace was entered.
    #[error("Email cannot be empty")]
    Empty,
    /// Fewer than [`Email::MIN_LENGTH`] characters after trimming.
    #[error("Email is too short")]
    TooShort,
    /// More than [`Email::MAX_LENGTH`] characters after trimming.
    #[error("Email is too long")]
    TooLong,
    /// The address does not look like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidFormat,
    /// The address contains `..`.
    #[error("Email cannot contain consecutive dots")]
    ConsecutiveDots,
    /// The address starts or ends with `.`.
    #[error("Email cannot start or end with a dot")]
    EdgeDot,
}

/// A validated email address.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed before any check
/// - Length: 5-254 characters
/// - `local@domain` with at least one dot in the domain
/// - No consecutive dots, no leading or trailing dot
///
/// ## Examples
///
/// ```
/// use shopverse_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("a@b.co").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());            // required
/// assert!(Email::parse("notanemail").is_err());  // pattern mismatch
/// assert!(Email::parse("a..b@c.com").is_err());  // consecutive dots
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Minimum length of an email address after trimming.
    pub const MIN_LENGTH: usize = 5;

    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from user input.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input violates, checked in this order:
    /// required, empty after trim, too short, too long, pattern, consecutive
    /// dots, leading/trailing dot.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Required);
        }

        let trimmed = s.trim();
        let len = trimmed.chars().count();

        if len == 0 {
            return Err(EmailError::Empty);
        }
        if len < Self::MIN_LENGTH {
            return Err(EmailError::TooShort);
        }
        if len > Self::MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        if !EMAIL_RE.is_match(trimmed) {
            return Err(EmailError::InvalidFormat);
        }
        if trimmed.contains("..") {
            return Err(EmailError::ConsecutiveDots);
        }
        if trimmed.starts_with('.') || trimmed.ends_with('.') {
            return Err(EmailError::EdgeDot);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the domain part of the email (after the @), lowercased.
    #[must_use]
    pub fn domain(&self) -> String {
        self.0.split('@').nth(1).unwrap_or("").to_lowercase()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate an email address for display in a form.
#[must_use]
pub fn validate_email(email: &str) -> ValidationResult {
    ValidationResult::from_result(&Email::parse(email))
}

/// Returns `true` if the input is an acceptable email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    Email::parse(email).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("a@b.co").is_ok());
        assert!(Email::parse("user@example.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        assert!(Email::parse("user@subdomain.example.com").is_ok());
        assert!(Email::parse("ali@company.com.pk").is_ok());
    }

    #[test]
    fn test_parse_required_and_empty() {
        assert_eq!(Email::parse(""), Err(EmailError::Required));
        assert_eq!(Email::parse("    "), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_length_bounds() {
        assert_eq!(Email::parse("a@b."), Err(EmailError::TooShort));
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let email = Email::parse("  user@example.com \n").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_parse_pattern_mismatch() {
        assert_eq!(Email::parse("notanemail"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::parse("user@localhost"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::parse("@domain.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::parse("user@-bad.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::parse("user@example.com."), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn test_parse_consecutive_dots() {
        let err = Email::parse("a..b@c.com").unwrap_err();
        assert_eq!(err, EmailError::ConsecutiveDots);
        assert_eq!(err.to_string(), "Email cannot contain consecutive dots");
    }

    #[test]
    fn test_parse_leading_dot() {
        assert_eq!(Email::parse(".user@example.com"), Err(EmailError::EdgeDot));
    }

    #[test]
    fn test_local_part_and_domain() {
        let email = Email::parse("User@Example.COM").unwrap();
        assert_eq!(email.local_part(), "User");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_validate_email_result() {
        let ok = validate_email("a@b.co");
        assert!(ok.is_valid);
        assert!(ok.error.is_empty());

        let bad = validate_email("notanemail");
        assert!(!bad.is_valid);
        assert_eq!(bad.error, "Please enter a valid email address");
    }

    #[test]
    fn test_serde_roundtrip() {
        let email = Email::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }
}
