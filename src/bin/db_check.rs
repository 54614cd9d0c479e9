//! Connectivity check for the Cloud Bookstore database.
//!
//! Attempts one TLS connection using `DB_PASSWORD` from the environment (or
//! a local `.env` file) and the bundled `ca.pem`, prints a success line, and
//! closes the connection. On failure the factory's own diagnostic is the
//! only output. Exits with status 0 either way.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(conn) = bookstore_db::acquire_connection().await {
        println!("Successfully connected to the Cloud Bookstore DB!");
        if let Err(err) = conn.close().await {
            tracing::warn!("failed to close connection cleanly: {err}");
        }
    }
}
