//! User domain entity.

use serde::{Deserialize, Serialize};

use crate::constants::UNASSIGNED_ID;

/// User domain entity.
///
/// The same shape is used on the wire for request and response bodies.
/// `id` is assigned by the storage backend; a value sent by a client is
/// accepted for symmetry but never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Backend-assigned identifier
    #[serde(default)]
    pub id: i32,
    /// Display name
    pub name: String,
}

impl User {
    /// Create a stored user with a known id
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Create a payload that has not been assigned an id yet
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self::new(UNASSIGNED_ID, name)
    }

    /// Copy of this user carrying the given id
    pub fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }

    /// Replace the display name, keeping the id
    pub fn rename(&mut self, name: String) {
        self.name = name;
    }
}
