//! Site user model (`users` collection).
//!
//! Users carry a role and an API token; the token is what admin requests
//! present as `Authorization: Bearer <token>`.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Role of a site user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user management.
    Admin,
    /// Manages verses, events and bible studies.
    Editor,
    #[default]
    Member,
}

/// Stored user, including the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    pub token: String,
}

/// Admin payload for creating or replacing a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl UserInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("user name must not be empty".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation(format!("invalid email '{}'", self.email)));
        }
        Ok(())
    }
}

/// User as shown to admins (token omitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Response to user creation; the only time the token is returned.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedUser {
    #[serde(flatten)]
    pub user: UserView,
    pub token: String,
}

impl UserRecord {
    pub fn from_input(id: impl Into<String>, token: impl Into<String>, input: UserInput) -> Self {
        Self {
            id: id.into(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            role: input.role,
            token: token.into(),
        }
    }
}
