//! Web UI server configuration

use socio_core::{get_env_bool, get_env_int, get_env_or};

/// Relay server configuration
#[derive(Debug, Clone)]
pub struct WebUiConfig {
    /// Bind host
    pub host: String,
    /// Bind port, 0 picks an ephemeral port
    pub port: u16,
    /// Attach a permissive CORS layer
    pub cors_enabled: bool,
    /// Serve the `/logs` event stream
    pub logs_enabled: bool,
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            cors_enabled: true,
            logs_enabled: false,
        }
    }
}

impl WebUiConfig {
    /// Load from `SOCIO_UI_HOST`, `SOCIO_UI_PORT`, `SOCIO_UI_CORS` and
    /// `SOCIO_UI_LOGS_ENABLED`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: get_env_or("SOCIO_UI_HOST", &defaults.host),
            port: get_env_int("SOCIO_UI_PORT", defaults.port),
            cors_enabled: get_env_bool("SOCIO_UI_CORS", defaults.cors_enabled),
            logs_enabled: get_env_bool("SOCIO_UI_LOGS_ENABLED", defaults.logs_enabled),
        }
    }

    /// `host:port` bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env() {
        std::env::set_var("SOCIO_UI_PORT", "4100");
        std::env::set_var("SOCIO_UI_LOGS_ENABLED", "true");
        let config = WebUiConfig::from_env();
        assert_eq!(config.port, 4100);
        assert!(config.logs_enabled);
        assert!(config.cors_enabled);
        assert_eq!(config.bind_addr(), "127.0.0.1:4100");
        std::env::remove_var("SOCIO_UI_PORT");
        std::env::remove_var("SOCIO_UI_LOGS_ENABLED");
    }
}
