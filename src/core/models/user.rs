//! User account types

use super::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Entity metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Assigned role
    pub role: RoleName,
    /// Account status
    pub status: UserStatus,
    /// Last login timestamp
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The closed set of role names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    /// Full administrative access
    Admin,
    /// Elevated read access
    Moderator,
    /// Regular user
    User,
}

impl RoleName {
    /// All role names, in precedence order
    pub const ALL: [RoleName; 3] = [RoleName::Admin, RoleName::Moderator, RoleName::User];

    /// Stable string form, matching the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "admin",
            RoleName::Moderator => "moderator",
            RoleName::User => "user",
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(RoleName::Admin),
            "moderator" => Ok(RoleName::Moderator),
            "user" => Ok(RoleName::User),
            _ => Err(format!("Invalid role name: {}", s)),
        }
    }
}

/// User status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Active user
    Active,
    /// Inactive user
    Inactive,
}

impl User {
    /// Create a new active user
    pub fn new(name: String, email: String, password_hash: String, role: RoleName) -> Self {
        Self {
            metadata: Metadata::new(),
            name,
            email,
            password_hash,
            role,
            status: UserStatus::Active,
            last_login_at: None,
        }
    }

    /// Get user ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Check if user is active
    pub fn is_active(&self) -> bool {
        matches!(self.status, UserStatus::Active)
    }

    /// Update last login
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(chrono::Utc::now());
        self.metadata.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_name_roundtrip() {
        for role in RoleName::ALL {
            assert_eq!(RoleName::from_str(role.as_str()).unwrap(), role);
        }
        assert!(RoleName::from_str("superuser").is_err());
    }

    #[test]
    fn test_new_user_is_active() {
        let user = User::new(
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
            "$argon2$fake".to_string(),
            RoleName::Moderator,
        );

        assert!(user.is_active());
        assert_eq!(user.role, RoleName::Moderator);
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
            "$argon2$fake".to_string(),
            RoleName::User,
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$argon2$fake"));
    }
}
