use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Name reported for a user document that has no `name` field.
pub const UNKNOWN_USER_NAME: &str = "Unknown name";

/// Check that a user ID can be used as a document ID.
pub fn validate_user_id(id: &str) -> Result<(), DomainError> {
    if id.trim().is_empty() {
        return Err(DomainError::invalid_input("user_id must not be empty"));
    }
    if id.contains('/') || id == "." || id == ".." {
        return Err(DomainError::invalid_input(format!(
            "user_id '{}' is not a valid document ID",
            id
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Rebuild a user from a stored document whose `name` may be absent.
    pub fn reconstitute(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.unwrap_or_else(|| UNKNOWN_USER_NAME.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of registering one embedding for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub user_id: String,
    pub name: String,
    pub embedding_id: String,
}
