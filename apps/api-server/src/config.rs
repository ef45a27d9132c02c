//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use bulletin_core::ResetCredentials;
use bulletin_core::ports::{AuthError, PasswordService};
use bulletin_infra::DatabaseConfig;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USERNAME: &str = "vapor_username";
const DEFAULT_DB_PASSWORD: &str = "vapor_password";
const DEFAULT_DB_NAME: &str = "vapor_database";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// `None` leaves the reset endpoint permanently locked.
    pub reset: Option<ResetConfig>,
}

/// Credentials guarding `DELETE /posts/reset/{username}/{password}`.
#[derive(Debug, Clone)]
pub struct ResetConfig {
    pub username: String,
    pub password: ResetPassword,
}

#[derive(Clone, PartialEq, Eq)]
pub enum ResetPassword {
    /// Plain text, hashed once at startup.
    Plain(String),
    /// An Argon2 PHC string.
    Hashed(String),
}

impl fmt::Debug for ResetPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetPassword::Plain(_) => f.write_str("Plain(***)"),
            ResetPassword::Hashed(_) => f.write_str("Hashed(***)"),
        }
    }
}

impl ResetConfig {
    /// Turn the configured pair into hashed credentials for the service.
    pub fn credentials(
        &self,
        passwords: &dyn PasswordService,
    ) -> Result<ResetCredentials, AuthError> {
        match &self.password {
            ResetPassword::Hashed(hash) => {
                ResetCredentials::with_password_hash(passwords, &self.username, hash.clone())
            }
            ResetPassword::Plain(password) => {
                tracing::warn!("RESET_PASSWORD is plain text; prefer RESET_PASSWORD_HASH");
                ResetCredentials::hash(passwords, &self.username, password)
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // DATABASE_URL wins; otherwise assemble one from its parts.
        let url = lookup("DATABASE_URL").unwrap_or_else(|| {
            DatabaseConfig::from_parts(
                &lookup("DATABASE_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                parsed(&lookup, "DATABASE_PORT").unwrap_or(DEFAULT_DB_PORT),
                &lookup("DATABASE_USERNAME").unwrap_or_else(|| DEFAULT_DB_USERNAME.to_string()),
                &lookup("DATABASE_PASSWORD").unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string()),
                &lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            )
        });

        let database = DatabaseConfig {
            url,
            max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(2),
        };

        let password = lookup("RESET_PASSWORD_HASH")
            .map(ResetPassword::Hashed)
            .or_else(|| lookup("RESET_PASSWORD").map(ResetPassword::Plain));
        let reset = lookup("RESET_USERNAME")
            .zip(password)
            .map(|(username, password)| ResetConfig { username, password });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            database,
            reset,
        }
    }
}

/// Parse a numeric variable, treating garbage as unset.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.parse().ok())
}
