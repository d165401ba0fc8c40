//! Login, registration and the stored session.

#![allow(clippy::unwrap_used)]

use shopverse_core::forms::{LoginForm, RegistrationForm};
use shopverse_integration_tests::{ADMIN_EMAIL, MockBackend, PASSWORD, USER_EMAIL, USER_ID};
use shopverse_storefront::AppError;

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn registration_form(email: &str) -> RegistrationForm {
    RegistrationForm {
        first_name: "Bilal".to_string(),
        last_name: "Ahmed".to_string(),
        email: email.to_string(),
        password: "Bright#Sky42".to_string(),
        confirm_password: "Bright#Sky42".to_string(),
    }
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_stores_session() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();

    let session = storefront
        .login(&login_form(USER_EMAIL, PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.full_name(), "Sana Mir");

    let store = storefront.session();
    assert!(store.is_logged_in());
    assert!(!store.is_admin());
    assert!(store.has_role("user"));
    assert_eq!(store.current_user_id().unwrap().as_str(), USER_ID);
    assert_eq!(store.email().as_deref(), Some(USER_EMAIL));
}

#[tokio::test]
async fn test_admin_login() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();

    storefront
        .login(&login_form(ADMIN_EMAIL, PASSWORD))
        .await
        .unwrap();
    assert!(storefront.session().is_admin());
    assert_eq!(storefront.session().full_name(), "Ayesha Khan");
}

#[tokio::test]
async fn test_login_failures_leave_session_empty() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();

    let err = storefront
        .login(&login_form(USER_EMAIL, "Wrong#Pass1"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Incorrect Password");

    let err = storefront
        .login(&login_form("nobody@example.com", PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "User not Found");

    assert!(!storefront.session().is_logged_in());
}

#[tokio::test]
async fn test_blank_login_sends_nothing() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();

    let err = storefront
        .login(&login_form(USER_EMAIL, ""))
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::Validation(msg) if msg == "Password is required"));
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();
    storefront
        .login(&login_form(USER_EMAIL, PASSWORD))
        .await
        .unwrap();

    storefront.logout();
    assert!(!storefront.session().is_logged_in());
    assert!(matches!(storefront.cart().await, Err(AppError::Session)));
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();

    let registration = registration_form("bilal@example.com").validate().unwrap();
    assert!(!registration.needs_confirmation());

    // The register response carries roles under `roles`.
    let user = storefront.register(&registration).await.unwrap();
    assert_eq!(user.full_name(), "Bilal Ahmed");
    assert!(user.has_role("user"));
    assert!(!user.is_admin());

    // Registering does not log the user in.
    assert!(!storefront.session().is_logged_in());

    let session = storefront
        .login(&login_form("bilal@example.com", "Bright#Sky42"))
        .await
        .unwrap();
    assert_eq!(session.id, user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let backend = MockBackend::start().await.unwrap();
    let storefront = backend.storefront().unwrap();

    let registration = registration_form(USER_EMAIL).validate().unwrap();
    let err = storefront.register(&registration).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Email already registered");
}
