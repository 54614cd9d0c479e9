//! Connection configuration
//!
//! The Cloud Bookstore service parameters are fixed deployment constants;
//! only the password comes from the environment (`DB_PASSWORD`, optionally
//! via a local `.env` file). Tests and embedders can override any field
//! through the builder instead of mutating the process environment.

use std::env;
use std::path::{Path, PathBuf};

/// Hostname of the Aiven-managed Cloud Bookstore MySQL service
pub const DEFAULT_HOST: &str = "mysql-340ee5fd-alex-063.f.aivencloud.com";
/// Service port
pub const DEFAULT_PORT: u16 = 27371;
/// Service account user
pub const DEFAULT_USER: &str = "avnadmin";
/// Database name
pub const DEFAULT_DATABASE: &str = "defaultdb";

/// Environment variable holding the database password
pub const PASSWORD_ENV_VAR: &str = "DB_PASSWORD";

/// Default path of the service CA bundle, co-located with the crate
fn default_ca_cert_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("ca.pem")
}

/// Connection configuration
///
/// A flat record of everything the factory needs to open one connection.
/// Constructed fresh per use and never cached.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Server hostname
    pub host: String,
    /// Server port
    pub port: u16,
    /// Username
    pub user: String,
    /// Password (secret; sourced from the environment, never hard-coded)
    pub password: String,
    /// Database name
    pub database: String,
    /// Path to the root CA certificate bundle (PEM)
    pub ca_cert_path: PathBuf,
}

impl DbConfig {
    /// Build the configuration from the process environment.
    ///
    /// Loads a local `.env` file into the environment if one exists (best
    /// effort, errors ignored), then reads [`PASSWORD_ENV_VAR`]. Every other
    /// field is filled with the fixed service constants.
    ///
    /// An unset password variable is passed through as an empty password.
    /// What the server does with an empty credential is the driver's
    /// business, not validated here.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let password = env::var(PASSWORD_ENV_VAR).unwrap_or_default();
        Self::builder().password(password).build()
    }

    /// Create a builder pre-loaded with the fixed service defaults.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = DbConfig::builder()
    ///     .host("localhost")
    ///     .port(3306)
    ///     .password("secret")
    ///     .build();
    /// ```
    pub fn builder() -> DbConfigBuilder {
        DbConfigBuilder::default()
    }
}

/// Builder for [`DbConfig`]
///
/// Every field defaults to the fixed Cloud Bookstore service value; the
/// password defaults to empty.
#[derive(Debug, Clone)]
pub struct DbConfigBuilder {
    host: String,
    port: u16,
    user: String,
    password: String,
    database: String,
    ca_cert_path: PathBuf,
}

impl Default for DbConfigBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            ca_cert_path: default_ca_cert_path(),
        }
    }
}

impl DbConfigBuilder {
    /// Set the server hostname
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Set the database name
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the path to the root CA certificate bundle
    pub fn ca_cert_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = path.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> DbConfig {
        DbConfig {
            host: self.host,
            port: self.port,
            user: self.user,
            password: self.password,
            database: self.database,
            ca_cert_path: self.ca_cert_path,
        }
    }
}
