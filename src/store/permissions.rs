//! Permission operations
//!
//! Creating or editing a permission with a role list writes the role-side
//! permission sets symmetrically inside one lock scope: either every named
//! role gains/loses the id, or nothing changes. Deletion of a referenced
//! permission follows the configured [`DeletePolicy`](crate::config::DeletePolicy).

use super::EntityStore;
use crate::config::DeletePolicy;
use crate::core::models::{Permission, PermissionEntry, RoleName};
use crate::utils::error::{ConsoleError, Result};
use tracing::{info, warn};

impl EntityStore {
    /// Insert a new permission and assign it to the given roles
    pub fn create_permission(
        &self,
        id: String,
        name: String,
        roles: &[RoleName],
    ) -> Result<Permission> {
        let mut inner = self.inner.write();

        if inner.permissions.contains_key(&id) {
            return Err(ConsoleError::conflict(format!(
                "Permission '{}' already exists",
                id
            )));
        }

        // Validate before mutating anything: every named role must be defined.
        for role in roles {
            if !inner.roles.contains_key(role) {
                return Err(ConsoleError::not_found(format!(
                    "Role '{}' is not defined",
                    role
                )));
            }
        }

        inner.permissions.insert(
            id.clone(),
            PermissionEntry {
                id: id.clone(),
                name: name.clone(),
            },
        );

        for role in roles {
            let def = inner
                .roles
                .get_mut(role)
                .expect("role presence checked above");
            def.permissions.insert(id.clone());
        }

        info!(permission = %id, roles = roles.len(), "Created permission");
        let granted = inner.roles_granting(&id);
        Ok(Permission {
            id,
            name,
            roles: granted,
        })
    }

    /// Get a permission by id, with its derived role list
    pub fn get_permission(&self, id: &str) -> Option<Permission> {
        let inner = self.inner.read();

        inner
            .permissions
            .get(id)
            .map(|entry| Permission::from_entry(entry, inner.roles_granting(id)))
    }

    /// List all permissions with derived role lists, ordered by id
    pub fn list_permissions(&self) -> Vec<Permission> {
        let inner = self.inner.read();

        inner
            .permissions
            .values()
            .map(|entry| Permission::from_entry(entry, inner.roles_granting(&entry.id)))
            .collect()
    }

    /// Case-insensitive substring filter over permission id and name
    pub fn search_permissions(&self, query: &str) -> Vec<Permission> {
        let needle = query.to_lowercase();

        self.list_permissions()
            .into_iter()
            .filter(|permission| {
                permission.id.to_lowercase().contains(&needle)
                    || permission.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Update a permission's name and role assignments
    ///
    /// The submitted role list is authoritative: roles named gain the id,
    /// roles absent lose it.
    pub fn update_permission(
        &self,
        id: &str,
        name: String,
        roles: &[RoleName],
    ) -> Result<Permission> {
        let mut inner = self.inner.write();

        if !inner.permissions.contains_key(id) {
            return Err(ConsoleError::not_found(format!(
                "Permission '{}' not found",
                id
            )));
        }

        for role in roles {
            if !inner.roles.contains_key(role) {
                return Err(ConsoleError::not_found(format!(
                    "Role '{}' is not defined",
                    role
                )));
            }
        }

        let entry = inner
            .permissions
            .get_mut(id)
            .expect("permission presence checked above");
        entry.name = name;

        for (role_name, def) in inner.roles.iter_mut() {
            if roles.contains(role_name) {
                def.permissions.insert(id.to_string());
            } else {
                def.permissions.remove(id);
            }
        }

        info!(permission = %id, roles = roles.len(), "Updated permission");
        let entry = inner.permissions[id].clone();
        let granted = inner.roles_granting(id);
        Ok(Permission::from_entry(&entry, granted))
    }

    /// Delete a permission
    ///
    /// With [`DeletePolicy::Restrict`] the delete is rejected while any role
    /// still grants the permission. With [`DeletePolicy::Cascade`] the id is
    /// removed from every referencing role in the same mutation.
    pub fn delete_permission(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write();

        if !inner.permissions.contains_key(id) {
            return Err(ConsoleError::not_found(format!(
                "Permission '{}' not found",
                id
            )));
        }

        let referencing = inner.roles_granting(id);

        if !referencing.is_empty() {
            match self.delete_policy {
                DeletePolicy::Restrict => {
                    let names: Vec<&str> =
                        referencing.iter().map(RoleName::as_str).collect();
                    warn!(permission = %id, roles = ?names, "Rejected permission deletion, still referenced");
                    return Err(ConsoleError::conflict(format!(
                        "Permission '{}' is granted by role(s): {}",
                        id,
                        names.join(", ")
                    )));
                }
                DeletePolicy::Cascade => {
                    for def in inner.roles.values_mut() {
                        def.permissions.remove(id);
                    }
                    info!(permission = %id, roles = referencing.len(), "Cascaded permission removal from roles");
                }
            }
        }

        inner.permissions.remove(id);
        info!(permission = %id, "Deleted permission");
        Ok(())
    }
}
