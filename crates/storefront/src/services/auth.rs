use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use shopverse_core::forms::Registration;
use shopverse_core::Session;

use crate::api::ApiClient;
use crate::error::Result;

/// `/login` and `/register`.
///
/// Passwords stay in [`SecretString`] until the request body is built.
#[derive(Clone, Copy)]
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /login`. Returns the user record to store as the session.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error, e.g. "User not Found" or
    /// "Incorrect Password".
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session> {
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.api.post(&["login"], &body).await
    }

    /// `POST /register`. The new account gets the default `user` role; the
    /// caller still has to log in.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error, e.g. "Email already registered".
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        let body = serde_json::json!({
            "email": registration.email.as_str(),
            "first_name": registration.first_name,
            "last_name": registration.last_name,
            "password": registration.password,
        });
        self.api.post(&["register"], &body).await
    }
}
