//! authz-service binary
//!
//! Reads configuration from TOML (`AUTHZ_CONFIG`, or
//! `<config dir>/authz-service/config.toml`), falling back to defaults.

use tracing::{error, info};

use authz_service::config::{config_path_from_env, AppConfig};
use authz_service::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_env();
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..Default::default()
    })
    .await?;

    handle.install_signal_handler();
    handle.wait().await;

    Ok(())
}
