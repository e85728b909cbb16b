//! Permission types

use super::user::RoleName;
use serde::{Deserialize, Serialize};

/// A stored permission: the canonical record, without role back-references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// Stable unique identifier, used as a foreign key in role definitions
    pub id: String,
    /// Human-readable name
    pub name: String,
}

/// A permission as returned by the API, with its role list derived from the
/// role definitions at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Roles that currently grant this permission (derived)
    pub roles: Vec<RoleName>,
}

impl Permission {
    /// Build the API view from a stored entry and its derived role list
    pub fn from_entry(entry: &PermissionEntry, roles: Vec<RoleName>) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            roles,
        }
    }
}
