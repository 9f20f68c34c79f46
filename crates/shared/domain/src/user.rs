//! Login account entity and role types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ROLE_ADMIN, ROLE_MEMBER, ROLE_TRAINER};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Trainer,
    Member,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Trainer => ROLE_TRAINER,
            UserRole::Member => ROLE_MEMBER,
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_TRAINER => Ok(UserRole::Trainer),
            ROLE_MEMBER => Ok(UserRole::Member),
            other => Err(DomainError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Login credential record.
///
/// The password is kept in plaintext, matching the stored data layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

impl User {
    /// Create a new login account
    pub fn new(id: Uuid, email: String, username: String, password: String, role: UserRole) -> Self {
        Self {
            id,
            email,
            username,
            password,
            role,
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// True when `login` is this account's email or username
    pub fn matches_login(&self, login: &str) -> bool {
        self.email == login || self.username == login
    }

    /// True when either identifier collides with this account
    pub fn collides_with(&self, email: &str, username: &str) -> bool {
        self.email == email || self.username == username
    }
}

/// The signed-in user as kept in the session slot (no password).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
