//! TLS-secured connection factory for the Cloud Bookstore database.
//!
//! The Cloud Bookstore database is an Aiven-managed MySQL service that only
//! accepts encrypted connections verified against the service's own root CA.
//! This crate does exactly one thing: open a single authenticated TLS session
//! to that service and hand the live connection to the caller.
//!
//! There is no pooling, no retry policy, and no query layer here. The wire
//! protocol is delegated entirely to [`mysql_async`]; this crate owns the
//! configuration, the TLS setup, and the connect attempt.
//!
//! # Examples
//!
//! Strict API (typed errors):
//!
//! ```no_run
//! # async fn example() -> bookstore_db::Result<()> {
//! use bookstore_db::connection::{DbConfig, DbConnection};
//!
//! let config = DbConfig::from_env();
//! let conn = DbConnection::connect(&config).await?;
//! println!("connected as thread {}", conn.id());
//! conn.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Lenient API (log-and-`None`, matching the original helper):
//!
//! ```no_run
//! # async fn example() {
//! if let Some(conn) = bookstore_db::acquire_connection().await {
//!     println!("Successfully connected to the Cloud Bookstore DB!");
//!     let _ = conn.close().await;
//! }
//! # }
//! ```

pub mod connection;

pub use connection::{acquire_connection, DbConfig, DbConnection, TlsConfig};

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error (bad CA file, malformed PEM, invalid parameter)
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error while reading configuration inputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the MySQL driver during connection establishment
    /// (covers DNS/TCP, TLS handshake, and authentication failures)
    #[error("driver error: {0}")]
    Driver(#[from] mysql_async::Error),
}

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;
