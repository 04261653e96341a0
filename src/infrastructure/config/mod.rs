use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Runtime configuration, merged from defaults, an optional `tabsum.toml`,
/// and `TABSUM_`-prefixed environment variables (highest precedence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub host: String,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Upper bound on accepted upload size, in bytes.
    pub max_upload_bytes: usize,

    /// Number of leading rows returned in the preview.
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 10 * 1024 * 1024,
            preview_rows: 3,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("tabsum.toml"))
            .merge(Env::prefixed("TABSUM_"))
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.preview_rows, 3);
        assert!(config.max_upload_bytes > 0);
    }
}
