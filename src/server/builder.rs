//! Server startup with automatic configuration loading

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Default configuration file location
const CONFIG_PATH: &str = "config/console.yaml";

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting RBAC console");

    let config = match Config::from_file(CONFIG_PATH).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            info!(
                "Configuration file not loaded ({}), using defaults",
                e
            );
            Config::default()
        }
    };

    let config = config.apply_env_overrides()?;
    config.validate()?;

    let server = HttpServer::new(&config)?;
    info!(
        "Console listening at http://{}:{}",
        config.server().host,
        config.server().port
    );

    server.start().await
}
