/// Configuration management for the Article Service
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to validate bearer tokens issued by the identity
    /// provider
    pub jwt_secret: String,
    /// Login page unauthenticated requests are redirected to
    pub login_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("ARTICLE_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("ARTICLE_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8084),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/blog".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: {
                let jwt_secret = match std::env::var("JWT_SECRET") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("JWT_SECRET must be set in production".to_string())
                    }
                    Err(_) => "dev-secret-do-not-use".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && jwt_secret.trim().len() < 32 {
                    return Err(
                        "JWT_SECRET must be at least 32 characters in production".to_string()
                    );
                }

                AuthConfig {
                    jwt_secret,
                    login_url: std::env::var("LOGIN_URL")
                        .unwrap_or_else(|_| "/userprofile/login".to_string()),
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const CONFIG_VARS: [&str; 7] = [
        "APP_ENV",
        "ARTICLE_SERVICE_HOST",
        "ARTICLE_SERVICE_PORT",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "JWT_SECRET",
        "LOGIN_URL",
    ];

    fn clear_config_env() {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }

    // Environment variables are process-global, so every scenario runs
    // sequentially inside this one test.
    #[test]
    fn test_config_from_env() {
        clear_config_env();

        // Defaults when nothing is set
        let config = Config::from_env().unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8084);
        assert_eq!(config.database.url, "postgresql://localhost/blog");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.jwt_secret, "dev-secret-do-not-use");
        assert_eq!(config.auth.login_url, "/userprofile/login");

        // Environment overrides
        env::set_var("ARTICLE_SERVICE_HOST", "127.0.0.1");
        env::set_var("ARTICLE_SERVICE_PORT", "9090");
        env::set_var("DATABASE_URL", "postgresql://localhost/blog_test");
        env::set_var("DATABASE_MAX_CONNECTIONS", "3");
        env::set_var("LOGIN_URL", "/accounts/login");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.host, "127.0.0.1");
        assert_eq!(config.app.port, 9090);
        assert_eq!(config.database.url, "postgresql://localhost/blog_test");
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.auth.login_url, "/accounts/login");

        // Unparseable numbers fall back to defaults
        env::set_var("ARTICLE_SERVICE_PORT", "not-a-port");
        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 8084);

        // Production refuses to start without a secret
        clear_config_env();
        env::set_var("APP_ENV", "production");
        assert_eq!(
            Config::from_env().unwrap_err(),
            "JWT_SECRET must be set in production"
        );

        // Short secrets are rejected in production too
        env::set_var("JWT_SECRET", "too-short");
        assert_eq!(
            Config::from_env().unwrap_err(),
            "JWT_SECRET must be at least 32 characters in production"
        );

        env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
        let config = Config::from_env().unwrap();
        assert_eq!(config.app.env, "production");
        assert_eq!(config.auth.jwt_secret, "0123456789abcdef0123456789abcdef");

        // Clean up
        clear_config_env();
    }
}
