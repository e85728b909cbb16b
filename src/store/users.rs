//! User operations

use super::EntityStore;
use crate::core::models::{RoleName, User, UserStatus};
use crate::utils::error::{ConsoleError, Result};
use std::collections::BTreeSet;
use tracing::info;
use uuid::Uuid;

/// Fields updatable on a user; `None` leaves the field unchanged
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<RoleName>,
    pub status: Option<UserStatus>,
}

impl EntityStore {
    /// Insert a new user, rejecting duplicate ids and emails
    pub fn create_user(&self, user: User) -> Result<User> {
        let mut inner = self.inner.write();

        if inner.users.contains_key(&user.id()) {
            return Err(ConsoleError::conflict("User already exists"));
        }

        if inner
            .users
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(ConsoleError::conflict("Email already exists"));
        }

        info!(user_id = %user.id(), email = %user.email, "Creating user");
        inner.users.insert(user.id(), user.clone());
        Ok(user)
    }

    /// Get user by ID
    pub fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.inner.read().users.get(&user_id).cloned()
    }

    /// Find user by email (case-insensitive)
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .read()
            .users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Apply a partial update to a user
    pub fn update_user(&self, user_id: Uuid, update: UserUpdate) -> Result<User> {
        let mut inner = self.inner.write();

        if let Some(email) = &update.email {
            let taken = inner
                .users
                .values()
                .any(|other| other.id() != user_id && other.email.eq_ignore_ascii_case(email));
            if taken {
                return Err(ConsoleError::conflict("Email already exists"));
            }
        }

        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ConsoleError::not_found("User not found"))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        user.metadata.touch();

        info!(user_id = %user_id, "Updated user");
        Ok(user.clone())
    }

    /// Replace a user's password hash
    pub fn update_user_password(&self, user_id: Uuid, password_hash: String) -> Result<()> {
        let mut inner = self.inner.write();

        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ConsoleError::not_found("User not found"))?;

        user.password_hash = password_hash;
        user.metadata.touch();
        Ok(())
    }

    /// Stamp a user's last login time
    pub fn update_user_last_login(&self, user_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write();

        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ConsoleError::not_found("User not found"))?;

        user.update_last_login();
        Ok(())
    }

    /// Remove a user from the store
    pub fn delete_user(&self, user_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write();

        inner
            .users
            .remove(&user_id)
            .ok_or_else(|| ConsoleError::not_found("User not found"))?;

        info!(user_id = %user_id, "Deleted user");
        Ok(())
    }

    /// List all users, ordered by creation time
    pub fn list_users(&self) -> Vec<User> {
        let inner = self.inner.read();

        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.metadata
                .created_at
                .cmp(&b.metadata.created_at)
                .then_with(|| a.id().cmp(&b.id()))
        });
        users
    }

    /// Case-insensitive substring filter over name and email
    pub fn search_users(&self, query: &str) -> Vec<User> {
        let needle = query.to_lowercase();

        self.list_users()
            .into_iter()
            .filter(|user| {
                user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Effective permission ids for a user, via their role definition
    pub fn permissions_for_user(&self, user_id: Uuid) -> Result<BTreeSet<String>> {
        let inner = self.inner.read();

        let user = inner
            .users
            .get(&user_id)
            .ok_or_else(|| ConsoleError::not_found("User not found"))?;

        Ok(inner
            .roles
            .get(&user.role)
            .map(|role| role.permissions.clone())
            .unwrap_or_default())
    }

    /// Check whether a user's role grants a permission
    pub fn has_permission(&self, user_id: Uuid, permission_id: &str) -> Result<bool> {
        Ok(self.permissions_for_user(user_id)?.contains(permission_id))
    }
}
