//! Role definition types

use super::user::RoleName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A role definition: a named bundle of permission ids
///
/// The permission-id set owned here is the canonical side of the
/// role↔permission relation; the permission-side role list is derived from
/// these sets and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role name, one of the closed set
    pub name: RoleName,
    /// Permission ids granted by this role
    pub permissions: BTreeSet<String>,
}

impl RoleDefinition {
    /// Create a role definition from an iterator of permission ids
    pub fn new<I, S>(name: RoleName, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether the role grants a permission
    pub fn grants(&self, permission_id: &str) -> bool {
        self.permissions.contains(permission_id)
    }
}
