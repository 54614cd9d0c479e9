//! Connection management
//!
//! This module handles:
//! * Configuration sourcing (fixed service parameters + `DB_PASSWORD`)
//! * TLS configuration with CA certificate verification
//! * The connection factory and the owned connection handle

mod config;
mod conn;
mod tls;

pub use config::{DbConfig, DbConfigBuilder};
pub use conn::{acquire_connection, DbConnection};
pub use tls::{TlsConfig, TlsConfigBuilder};
