mod application;
mod domain;
mod infrastructure;
mod interfaces;

use tracing::info;

use crate::infrastructure::config::AppConfig;

/// Load configuration, start the HTTP server, and run it to completion.
pub async fn run() -> std::io::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = AppConfig::load().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!(host = %config.host, port = config.port, "Starting upload summary server");

    let server = crate::interfaces::http::start_server(&config)?;
    server.await
}
