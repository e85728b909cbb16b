//! # RBAC Console
//!
//! An administration service for role-based access control: users, roles,
//! and permissions held in an in-memory store and managed over a REST API.
//!
//! The store keeps the role↔permission relation in one canonical place (the
//! permission-id sets owned by role definitions) and derives the
//! permission-side role lists on read, so the two directions can never
//! disagree. Deleting a permission that roles still grant follows a
//! configurable policy: reject, or cascade the removal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rbac_console::{Config, Console};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/console.yaml").await?;
//!     let console = Console::new(config)?;
//!     console.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedded store
//!
//! The entity store works without the HTTP layer:
//!
//! ```rust
//! use rbac_console::config::StoreConfig;
//! use rbac_console::core::models::RoleName;
//! use rbac_console::store::EntityStore;
//!
//! let store = EntityStore::new(&StoreConfig::default());
//! let moderator = store.get_role(RoleName::Moderator).unwrap();
//! assert!(moderator.grants("view_users"));
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod store;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::models::{Permission, RoleDefinition, RoleName, User, UserStatus};
pub use store::EntityStore;
pub use utils::error::{ConsoleError, Result};

use tracing::info;

/// A minimal console service handle
pub struct Console {
    config: Config,
    server: server::HttpServer,
}

impl Console {
    /// Create a new console instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating console instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the console server
    pub async fn run(self) -> Result<()> {
        info!(
            host = %self.config.server().host,
            port = self.config.server().port,
            "Starting RBAC console"
        );

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
