//! Session lifecycle
//!
//! Sessions are created on login and torn down on logout or expiry. Each
//! session is an explicit object resolved per request; there is no ambient
//! authenticated-user state anywhere in the service.

use crate::utils::crypto::generate_token;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

const SESSION_TOKEN_LENGTH: usize = 48;

/// An authenticated session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,
    /// The authenticated user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// In-memory session table
pub struct SessionManager {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a session manager with the given session lifetime
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Mint a new session for a user
    pub fn create(&self, user_id: Uuid) -> Session {
        let now = Utc::now();
        let session = Session {
            token: generate_token(SESSION_TOKEN_LENGTH),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Resolve a token to its live session
    ///
    /// Expired sessions are evicted on access and resolve to `None`.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let expired = match self.sessions.get(token) {
            Some(session) if session.is_expired() => true,
            Some(session) => return Some(session.clone()),
            None => return None,
        };

        if expired {
            self.sessions.remove(token);
        }
        None
    }

    /// Tear down a session; returns whether it existed
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Tear down every session belonging to a user
    pub fn revoke_for_user(&self, user_id: Uuid) -> usize {
        let tokens: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.token.clone())
            .collect();

        for token in &tokens {
            self.sessions.remove(token);
        }
        tokens.len()
    }

    /// Drop all expired sessions; returns the number evicted
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before - self.sessions.len()
    }

    /// Number of live sessions
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
