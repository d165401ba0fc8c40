//! Logged-in user identity and role.
//!
//! The backend returns the user's role in two shapes: `{ id, name: [...] }`
//! from login and `{ id, roles: [...] }` from registration, and either
//! field may hold a single string instead of a list. [`Role`] resolves this
//! once at deserialization time so call sites only ever see [`RoleNames`].

use serde::{Deserialize, Serialize};

use super::id::{RoleId, UserId};

/// Name of the role that unlocks the admin panel.
pub const ADMIN_ROLE: &str = "admin";

/// Role names attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleNames {
    /// A single role name, e.g. `"admin"`.
    Single(String),
    /// A collection of role names, e.g. `["user", "admin"]`.
    Many(Vec<String>),
}

impl RoleNames {
    /// Returns `true` if `name` is one of these roles.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Single(role) => role == name,
            Self::Many(roles) => roles.iter().any(|role| role == name),
        }
    }

    /// Iterate over the role names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Self::Single(role) => std::slice::from_ref(role),
            Self::Many(roles) => roles,
        };
        names.iter().map(String::as_str)
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Single(role) if role.is_empty())
    }
}

impl Default for RoleNames {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

/// Wire shape of a role, accepting both backend variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<RoleNames>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    roles: Option<RoleNames>,
}

/// A user's role record.
///
/// Always serialized as `{ "id": ..., "name": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawRole", into = "RawRole")]
pub struct Role {
    /// Backend role document ID, if present.
    pub id: Option<RoleId>,
    /// Resolved role names.
    pub names: RoleNames,
}

impl From<RawRole> for Role {
    fn from(raw: RawRole) -> Self {
        // `name` wins unless it is missing or an empty string.
        let names = raw
            .name
            .filter(|names| !names.is_blank())
            .or(raw.roles)
            .unwrap_or_default();
        Self { id: raw.id, names }
    }
}

impl From<Role> for RawRole {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: Some(role.names),
            roles: None,
        }
    }
}

/// The logged-in user, as returned by the login and register endpoints.
///
/// Presence of a session is the only login signal: there is no expiry and
/// no client-side token validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend user ID.
    pub id: UserId,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Email address, as stored by the backend.
    #[serde(default)]
    pub email: String,
    /// Role record; absent for malformed or legacy users.
    #[serde(default)]
    pub role: Option<Role>,
}

impl Session {
    /// Display name: `"first last"` trimmed, or `"User"` when both are blank.
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            "User".to_string()
        } else {
            name.to_string()
        }
    }

    /// Returns `true` if the user holds `role_name`.
    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.role
            .as_ref()
            .is_some_and(|role| role.names.contains(role_name))
    }

    /// Returns `true` if the user holds the [`ADMIN_ROLE`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}
