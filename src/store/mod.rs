//! In-memory entity store
//!
//! Source of truth for users, role definitions, and permissions. All state
//! lives behind a single `RwLock`, so every mutation is atomic with respect
//! to readers: the role↔permission relation can never be observed
//! half-updated.
//!
//! The relation itself is stored once, on the role side. Permission views
//! derive their role list from the role definitions at read time, which makes
//! the inverse invariant hold by construction.

mod permissions;
mod roles;
mod users;

pub use users::UserUpdate;

use crate::config::{DeletePolicy, StoreConfig};
use crate::core::models::{PermissionEntry, RoleDefinition, RoleName, User};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;
use uuid::Uuid;

/// In-memory entity store for users, roles, and permissions
pub struct EntityStore {
    pub(crate) inner: RwLock<StoreInner>,
    pub(crate) delete_policy: DeletePolicy,
}

pub(crate) struct StoreInner {
    pub(crate) users: HashMap<Uuid, User>,
    pub(crate) roles: BTreeMap<RoleName, RoleDefinition>,
    pub(crate) permissions: BTreeMap<String, PermissionEntry>,
}

/// Dashboard counters
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Total number of users
    pub total_users: usize,
    /// Users with active status
    pub active_users: usize,
    /// Number of role definitions
    pub total_roles: usize,
    /// Number of permissions
    pub total_permissions: usize,
}

impl EntityStore {
    /// Create a new store, seeding the default data set if configured
    pub fn new(config: &StoreConfig) -> Self {
        let mut inner = StoreInner {
            users: HashMap::new(),
            roles: BTreeMap::new(),
            permissions: BTreeMap::new(),
        };

        if config.seed_defaults {
            Self::seed_defaults(&mut inner);
            info!(
                roles = inner.roles.len(),
                permissions = inner.permissions.len(),
                "Seeded default role and permission set"
            );
        }

        Self {
            inner: RwLock::new(inner),
            delete_policy: config.delete_policy,
        }
    }

    /// Seed the standard role and permission fixtures
    ///
    /// The role-side permission sets are canonical; permission role lists are
    /// always derived from them.
    fn seed_defaults(inner: &mut StoreInner) {
        let defaults = [
            ("view_users", "View Users"),
            ("manage_users", "Manage Users"),
            ("view_roles", "View Roles"),
            ("manage_roles", "Manage Roles"),
            ("view_permissions", "View Permissions"),
            ("manage_permissions", "Manage Permissions"),
        ];

        for (id, name) in defaults {
            inner.permissions.insert(
                id.to_string(),
                PermissionEntry {
                    id: id.to_string(),
                    name: name.to_string(),
                },
            );
        }

        let roles = [
            RoleDefinition::new(
                RoleName::Admin,
                [
                    "view_users",
                    "manage_users",
                    "view_roles",
                    "manage_roles",
                    "view_permissions",
                    "manage_permissions",
                ],
            ),
            RoleDefinition::new(RoleName::Moderator, ["view_users", "view_roles"]),
            RoleDefinition::new(RoleName::User, ["view_users"]),
        ];

        for role in roles {
            inner.roles.insert(role.name, role);
        }
    }

    /// Dashboard counters
    pub fn stats(&self) -> DashboardStats {
        let inner = self.inner.read();

        DashboardStats {
            total_users: inner.users.len(),
            active_users: inner.users.values().filter(|u| u.is_active()).count(),
            total_roles: inner.roles.len(),
            total_permissions: inner.permissions.len(),
        }
    }

    /// Permission ids referenced by a role definition without a matching
    /// permission entry
    ///
    /// Always empty while mutations go through the store; exposed so the
    /// health endpoint and tests can assert it.
    pub fn dangling_references(&self) -> Vec<(RoleName, String)> {
        let inner = self.inner.read();

        inner
            .roles
            .values()
            .flat_map(|role| {
                role.permissions
                    .iter()
                    .filter(|id| !inner.permissions.contains_key(*id))
                    .map(|id| (role.name, id.clone()))
            })
            .collect()
    }
}

impl StoreInner {
    /// Roles whose permission set contains the given id, in precedence order
    pub(crate) fn roles_granting(&self, permission_id: &str) -> Vec<RoleName> {
        RoleName::ALL
            .into_iter()
            .filter(|name| {
                self.roles
                    .get(name)
                    .is_some_and(|role| role.grants(permission_id))
            })
            .collect()
    }
}
