//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::store::EntityStore;
use crate::utils::error::{ConsoleError, Result};
use actix_cors::Cors;
use actix_web::{web, App, HttpServer as ActixHttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, wiring the store and auth system
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let store = Arc::new(EntityStore::new(config.store()));
        let auth = AuthSystem::new(config.auth(), Arc::clone(&store));
        auth.ensure_bootstrap_admin()?;

        let state = AppState::new(config.clone(), store, auth);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Build the CORS middleware from configuration
    fn cors(config: &ServerConfig) -> Cors {
        let cors_config = &config.cors;

        if !cors_config.enabled {
            return Cors::default();
        }

        let mut cors = if cors_config.allowed_origins.is_empty() {
            Cors::default().allow_any_origin()
        } else {
            let mut cors = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        cors = cors
            .allow_any_method()
            .allow_any_header()
            .max_age(cors_config.max_age as usize);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }

        cors
    }

    /// Start the server and run until shutdown
    pub async fn start(self) -> Result<()> {
        let bind_addr = (self.config.host.clone(), self.config.port);
        let server_config = self.config.clone();
        let state = web::Data::new(self.state);

        info!(
            host = %self.config.host,
            port = self.config.port,
            "Starting HTTP server"
        );

        let mut server = ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Self::cors(&server_config))
                .wrap(TracingLogger::default())
                .configure(routes::configure)
        })
        .bind(bind_addr)
        .map_err(|e| ConsoleError::Config(format!("Failed to bind server: {}", e)))?;

        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        server
            .run()
            .await
            .map_err(|e| ConsoleError::Internal(format!("Server error: {}", e)))
    }
}
