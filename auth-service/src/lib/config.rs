use std::env;

use auth::AuthConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SERVER__HTTP_PORT, AUTH__TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTH__TOKEN__SECRET=... overrides auth.token.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let configuration = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                http_port = 8080

                [auth.token]
                secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.auth.token.lifetime_seconds, 43_200);
        assert_eq!(config.auth.login_timeout_ms, 5_000);
        assert_eq!(config.auth.hashing, auth::HashingConfig::default());
        assert!(config.auth.token.validate().is_ok());
    }
}
