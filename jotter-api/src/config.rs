/// Configuration management for the API server
///
/// Configuration comes from environment variables, read once at startup
/// into a typed struct. A `.env` file is honored in development.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `API_HOST`: bind host (default: 0.0.0.0)
/// - `API_PORT`: bind port (default: 8080)
/// - `JWT_SECRET`: session token signing key, at least 32 bytes (required)
/// - `SESSION_TOKEN_TTL_HOURS`: token lifetime (default: 24)
/// - `NOTE_TITLE_MAX_CHARS`: title length bound (default: 255)
/// - `NOTE_CONTENT_MAX_CHARS`: content length bound (default: 10000)
/// - `RUST_LOG`: log filter (default: info)

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session/token configuration
    pub auth: AuthConfig,

    /// Note field bounds
    pub notes: NoteLimits,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Session/token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signing key for session tokens; at least 32 bytes.
    ///
    /// Generate with: `openssl rand -hex 32`
    pub token_secret: String,

    /// Session token lifetime in hours
    pub token_ttl_hours: i64,
}

/// Configured bounds on note fields.
///
/// Counted in characters, not bytes. These are policy, not schema: the
/// database columns are unbounded TEXT and the limit is enforced before
/// any write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoteLimits {
    /// Maximum title length
    pub title_max_chars: usize,

    /// Maximum content length
    pub content_max_chars: usize,
}

impl Default for NoteLimits {
    fn default() -> Self {
        Self {
            title_max_chars: 255,
            content_max_chars: 10_000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value fails to
    /// parse, or the token secret is shorter than 32 bytes.
    pub fn from_env() -> anyhow::Result<Self> {
        // Honor a .env file in development
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let token_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if token_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let token_ttl_hours = env::var("SESSION_TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()?;

        let title_max_chars = env::var("NOTE_TITLE_MAX_CHARS")
            .unwrap_or_else(|_| "255".to_string())
            .parse::<usize>()?;

        let content_max_chars = env::var("NOTE_CONTENT_MAX_CHARS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse::<usize>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            auth: AuthConfig {
                token_secret,
                token_ttl_hours,
            },
            notes: NoteLimits {
                title_max_chars,
                content_max_chars,
            },
        })
    }

    /// Returns the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/jotter_test".to_string(),
                max_connections: 10,
            },
            auth: AuthConfig {
                token_secret: "test-secret-key-at-least-32-bytes-long".to_string(),
                token_ttl_hours: 24,
            },
            notes: NoteLimits::default(),
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_note_limits_defaults() {
        let limits = NoteLimits::default();
        assert_eq!(limits.title_max_chars, 255);
        assert_eq!(limits.content_max_chars, 10_000);
    }
}
