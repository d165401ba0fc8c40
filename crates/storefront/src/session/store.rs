//! Typed access to the stored session record.

use shopverse_core::{Session, UserId};

use super::storage::SessionStorage;

/// Storage key of the session record.
pub const SESSION_KEY: &str = "user";

/// Storage key of the cached cart. Only ever deleted.
pub const CART_KEY: &str = "cart";

/// Read/write boundary for the logged-in session.
///
/// The presence of a stored record is the only login signal: there is no
/// expiry and no token check.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `session`, replacing any existing one.
    pub fn save_session(&self, session: &Session) {
        let json = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize session");
                return;
            }
        };
        if let Err(e) = self.storage.set(SESSION_KEY, &json) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    /// The stored session, or `None` when absent or unreadable.
    ///
    /// A record that no longer parses is removed.
    #[must_use]
    pub fn get_session(&self) -> Option<Session> {
        let raw = self.read_raw()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt session record");
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    tracing::warn!(error = %e, "Failed to remove corrupt session");
                }
                None
            }
        }
    }

    /// Whether a session record is stored. Its shape is not checked.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read_raw().is_some()
    }

    /// Whether the stored session has the `admin` role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.get_session().is_some_and(|s| s.is_admin())
    }

    /// Whether the stored session has `role_name`.
    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.get_session().is_some_and(|s| s.has_role(role_name))
    }

    /// ID of the logged-in user.
    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        self.get_session().map(|s| s.id)
    }

    /// Display name of the logged-in user, `User` when logged out.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.get_session()
            .map_or_else(|| "User".to_string(), |s| s.full_name())
    }

    /// Email of the logged-in user.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.get_session().map(|s| s.email)
    }

    /// Remove the session and the cached cart. Safe to call when logged out.
    pub fn clear_session(&self) {
        for key in [SESSION_KEY, CART_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to clear session data");
            }
        }
    }

    fn read_raw(&self) -> Option<String> {
        match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session");
                None
            }
        }
    }
}
