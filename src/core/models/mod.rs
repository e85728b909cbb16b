//! Entity models for the console
//!
//! Users, role definitions, and permissions, plus the metadata envelope
//! shared by stored entities.

pub mod permission;
pub mod role;
pub mod user;

pub use permission::{Permission, PermissionEntry};
pub use role::RoleDefinition;
pub use user::{RoleName, User, UserStatus};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common metadata for stored entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Unique identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Version, incremented on every update
    pub version: i64,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }
}

impl Metadata {
    /// Create new metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the timestamp and increment version
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
        self.version += 1;
    }
}
