//! Authentication and account operations
//!
//! The `AuthSystem` owns the session table and fronts every operation that
//! needs credential checks: login/logout, registration, password change, and
//! profile updates. Entity state lives in the [`EntityStore`]; this module
//! never caches users.

mod password;
pub mod session;

pub use session::{Session, SessionManager};

use crate::config::AuthConfig;
use crate::core::models::{RoleName, User};
use crate::store::EntityStore;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation::DataValidator;
use std::sync::Arc;
use tracing::{info, warn};

/// Authentication system
pub struct AuthSystem {
    config: AuthConfig,
    store: Arc<EntityStore>,
    sessions: SessionManager,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, store: Arc<EntityStore>) -> Self {
        Self {
            config: config.clone(),
            store,
            sessions: SessionManager::new(config.session_ttl_secs),
        }
    }

    /// Create the bootstrap administrator if configured and absent
    pub fn ensure_bootstrap_admin(&self) -> Result<()> {
        let Some(admin) = &self.config.bootstrap_admin else {
            return Ok(());
        };

        if self.store.find_user_by_email(&admin.email).is_some() {
            return Ok(());
        }

        let password_hash = hash_password(&admin.password)?;
        let user = User::new(
            admin.name.clone(),
            admin.email.clone(),
            password_hash,
            RoleName::Admin,
        );
        self.store.create_user(user)?;

        info!(email = %admin.email, "Created bootstrap administrator");
        Ok(())
    }

    /// Register a new account with the configured default role
    pub fn register(&self, name: String, email: String, password: String) -> Result<User> {
        DataValidator::validate_display_name(&name)?;
        DataValidator::validate_email(&email)?;
        DataValidator::validate_password(&password)?;

        let password_hash = hash_password(&password)?;
        let user = User::new(name, email, password_hash, self.config.default_role);

        let user = self.store.create_user(user)?;
        info!(user_id = %user.id(), "Registered new account");
        Ok(user)
    }

    /// Log a user in and create a session
    pub fn login(&self, email: &str, password: &str) -> Result<(User, Session)> {
        let user = self.store.find_user_by_email(email).ok_or_else(|| {
            warn!(email = %email, "Login attempt for unknown email");
            ConsoleError::auth("Invalid email or password")
        })?;

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id(), "Login attempt with invalid password");
            return Err(ConsoleError::auth("Invalid email or password"));
        }

        if !user.is_active() {
            warn!(user_id = %user.id(), "Login attempt for inactive account");
            return Err(ConsoleError::auth("Account is disabled"));
        }

        self.store.update_user_last_login(user.id())?;
        let session = self.sessions.create(user.id());

        // Re-read to pick up the stamped login time.
        let user = self
            .store
            .get_user(user.id())
            .ok_or_else(|| ConsoleError::internal("User vanished during login"))?;

        info!(user_id = %user.id(), "User logged in");
        Ok((user, session))
    }

    /// Tear down a session
    pub fn logout(&self, token: &str) {
        if self.sessions.revoke(token) {
            info!("Session revoked");
        }
    }

    /// Resolve a session token to its user
    pub fn current_user(&self, token: &str) -> Result<User> {
        let session = self
            .sessions
            .resolve(token)
            .ok_or_else(|| ConsoleError::auth("Invalid or expired session"))?;

        self.store
            .get_user(session.user_id)
            .ok_or_else(|| ConsoleError::auth("Invalid or expired session"))
    }

    /// Check whether a user's role grants a permission
    pub fn has_permission(&self, user: &User, permission_id: &str) -> Result<bool> {
        self.store.has_permission(user.id(), permission_id)
    }

    /// Number of live sessions
    pub fn active_sessions(&self) -> usize {
        self.sessions.purge_expired();
        self.sessions.active_count()
    }

    pub(crate) fn store(&self) -> &EntityStore {
        &self.store
    }

    pub(crate) fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}
