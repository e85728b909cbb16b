//! Role definition operations
//!
//! Edits to a role's permission set are validated against the permission
//! table and applied under the store write lock, so the set either updates
//! as a whole or not at all.

use super::{EntityStore, StoreInner};
use crate::core::models::{RoleDefinition, RoleName};
use crate::utils::error::{ConsoleError, Result};
use std::collections::BTreeSet;
use tracing::{info, warn};

impl EntityStore {
    /// Insert a new role definition
    pub fn create_role(&self, role: RoleDefinition) -> Result<RoleDefinition> {
        let mut inner = self.inner.write();

        if inner.roles.contains_key(&role.name) {
            return Err(ConsoleError::conflict(format!(
                "Role '{}' already exists",
                role.name
            )));
        }

        check_permission_ids(&inner, &role.permissions)?;

        info!(role = %role.name, permissions = role.permissions.len(), "Creating role");
        inner.roles.insert(role.name, role.clone());
        Ok(role)
    }

    /// Get a role definition by name
    pub fn get_role(&self, name: RoleName) -> Option<RoleDefinition> {
        self.inner.read().roles.get(&name).cloned()
    }

    /// List all role definitions
    pub fn list_roles(&self) -> Vec<RoleDefinition> {
        self.inner.read().roles.values().cloned().collect()
    }

    /// Case-insensitive substring filter over role names
    pub fn search_roles(&self, query: &str) -> Vec<RoleDefinition> {
        let needle = query.to_lowercase();

        self.list_roles()
            .into_iter()
            .filter(|role| role.name.as_str().contains(&needle))
            .collect()
    }

    /// Replace a role's permission set
    ///
    /// Every submitted id must name an existing permission; duplicates in the
    /// submission collapse. The stored set afterwards equals exactly the set
    /// submitted.
    pub fn set_role_permissions(
        &self,
        name: RoleName,
        permission_ids: &[String],
    ) -> Result<RoleDefinition> {
        let mut inner = self.inner.write();

        if !inner.roles.contains_key(&name) {
            return Err(ConsoleError::not_found(format!("Role '{}' not found", name)));
        }

        let submitted: BTreeSet<String> = permission_ids.iter().cloned().collect();
        check_permission_ids(&inner, &submitted)?;

        let role = inner
            .roles
            .get_mut(&name)
            .expect("role presence checked above");
        role.permissions = submitted;

        info!(role = %name, permissions = role.permissions.len(), "Replaced role permission set");
        Ok(role.clone())
    }

    /// Delete a role definition
    ///
    /// Rejected while any user is assigned to the role; a user's role is a
    /// required scalar, so there is nothing to cascade to.
    pub fn delete_role(&self, name: RoleName) -> Result<()> {
        let mut inner = self.inner.write();

        if !inner.roles.contains_key(&name) {
            return Err(ConsoleError::not_found(format!("Role '{}' not found", name)));
        }

        let assigned = inner.users.values().filter(|u| u.role == name).count();
        if assigned > 0 {
            warn!(role = %name, assigned, "Rejected role deletion, still assigned");
            return Err(ConsoleError::conflict(format!(
                "Role '{}' is assigned to {} user(s); reassign them first",
                name, assigned
            )));
        }

        inner.roles.remove(&name);
        info!(role = %name, "Deleted role");
        Ok(())
    }
}

/// Reject permission ids that do not name an existing permission
fn check_permission_ids<'a, I>(inner: &StoreInner, ids: I) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    let unknown: Vec<&str> = ids
        .into_iter()
        .filter(|id| !inner.permissions.contains_key(*id))
        .map(String::as_str)
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ConsoleError::validation(format!(
            "Unknown permission id(s): {}",
            unknown.join(", ")
        )))
    }
}
