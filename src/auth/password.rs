//! Password and profile operations

use super::AuthSystem;
use crate::store::UserUpdate;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation::DataValidator;
use tracing::info;
use uuid::Uuid;

impl AuthSystem {
    /// Change a user's password
    ///
    /// Requires the current password to verify, the new password to meet the
    /// length rule, and the confirmation to match. Other sessions of the user
    /// are revoked on success.
    pub fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<()> {
        DataValidator::validate_password_confirmation(new_password, confirm_password)?;

        let user = self
            .store()
            .get_user(user_id)
            .ok_or_else(|| ConsoleError::not_found("User not found"))?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(ConsoleError::auth("Invalid current password"));
        }

        let new_hash = hash_password(new_password)?;
        self.store().update_user_password(user_id, new_hash)?;
        self.sessions().revoke_for_user(user_id);

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Update a user's profile (display name and email)
    pub fn update_profile(&self, user_id: Uuid, name: String, email: String) -> Result<()> {
        DataValidator::validate_display_name(&name)?;
        DataValidator::validate_email(&email)?;

        self.store().update_user(
            user_id,
            UserUpdate {
                name: Some(name),
                email: Some(email),
                ..Default::default()
            },
        )?;

        info!(user_id = %user_id, "Profile updated");
        Ok(())
    }
}
