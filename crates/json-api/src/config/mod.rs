//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// PromoRadar JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "promoradar-json", about = "PromoRadar JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session authentication settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_fill_everything_but_secrets() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "promoradar-json",
            "--database-url",
            "postgres://localhost/promoradar",
            "--session-secret",
            "0123456789abcdef",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:5050");
        assert_eq!(config.database.database_max_connections, 10);
        assert!(!config.database.run_migrations);
        assert_eq!(config.auth.session_ttl_minutes, 120);

        Ok(())
    }

    #[test]
    fn session_secret_is_required() {
        let result = ServerConfig::try_parse_from([
            "promoradar-json",
            "--database-url",
            "postgres://localhost/promoradar",
        ]);

        assert!(result.is_err(), "expected a missing session secret to fail");
    }
}
