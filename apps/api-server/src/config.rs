//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "postgres")]
use inkwell_infra::database::DatabaseConfig;
use inkwell_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    /// Run pending migrations on start-up.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    /// Issue the session cookie with `Secure` and `SameSite=None`.
    pub secure_cookies: bool,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// `RUST_ENV` is `production` or `prod`.
pub fn is_production() -> bool {
    env::var("RUST_ENV")
        .map(|v| v == "production" || v == "prod")
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 20),
            min_connections: parsed("DB_MIN_CONNECTIONS", 2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            #[cfg(feature = "postgres")]
            database,
            auto_migrate: env::var("DB_AUTO_MIGRATE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            jwt: JwtConfig::from_env(),
            secure_cookies: is_production(),
        }
    }
}
