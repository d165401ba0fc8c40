//! Unified error handling with Sentry integration.
//!
//! Every failure that reaches the view layer is an [`AppError`], and its
//! `Display` output is exactly the message to show the user. Transport and
//! status-code details never leak past the API client.

use thiserror::Error;

use shopverse_core::forms::FormError;
use shopverse_core::validation::{ImageError, PhoneError};
use shopverse_core::EmailError;

/// Message shown for requests that never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error - check your connection";

/// Message shown when nothing more specific is known.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected locally. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The backend could not be reached.
    #[error("Network error - check your connection")]
    Network,

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Anything else, e.g. an undecodable success body. The payload is for
    /// logs only.
    #[error("Something went wrong")]
    Unexpected(String),

    /// No usable local session; the user should log in.
    #[error("Please log in to continue")]
    Session,
}

impl AppError {
    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for server errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is worth sending to Sentry.
    ///
    /// Validation and session errors are expected user states.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        matches!(
            self,
            Self::Network | Self::Server { .. } | Self::Unexpected(_)
        )
    }

    /// Log the error and capture reportable ones to Sentry.
    pub fn report(&self) {
        if self.is_reportable() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                detail = ?self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "User-facing error");
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PhoneError> for AppError {
    fn from(err: PhoneError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the logged-in session.
///
/// Call this after a successful login to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display_is_user_message() {
        assert_eq!(AppError::Network.to_string(), NETWORK_ERROR_MESSAGE);
        assert_eq!(
            AppError::Unexpected("invalid type: string".to_string()).to_string(),
            FALLBACK_ERROR_MESSAGE
        );
        let err = AppError::Server {
            status: 404,
            message: "Product not Found".to_string(),
        };
        assert_eq!(err.message(), "Product not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_validation_errors_convert() {
        let err = AppError::from(FormError::PasswordMismatch);
        assert!(matches!(&err, AppError::Validation(msg) if msg == "Passwords do not match"));
        assert_eq!(err.status(), None);

        let err = AppError::from(PhoneError::TooShort);
        assert_eq!(
            err.to_string(),
            "Phone number is too short. Please enter at least 10 digits"
        );

        let err = AppError::from(ImageError::TooLarge);
        assert_eq!(err.to_string(), "Image size should be less than 5MB");
    }

    #[test]
    fn test_reportable() {
        assert!(AppError::Network.is_reportable());
        assert!(AppError::Unexpected(String::new()).is_reportable());
        assert!(
            AppError::Server {
                status: 500,
                message: "Server error".to_string()
            }
            .is_reportable()
        );
        assert!(!AppError::Session.is_reportable());
        assert!(!AppError::Validation("Your cart is empty".to_string()).is_reportable());
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        AppError::Network.report();
        AppError::Session.report();
    }
}
