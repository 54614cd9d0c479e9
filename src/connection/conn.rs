//! Connection factory and handle

use super::config::DbConfig;
use super::tls::TlsConfig;
use crate::Result;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder};
use tracing::Instrument;

/// One live, authenticated, TLS-encrypted session to the database server.
///
/// Exclusively owned by the caller; the factory keeps no reference. Call
/// [`DbConnection::close`] when done — dropping without closing leaves
/// cleanup to the driver's background handling.
pub struct DbConnection {
    inner: Conn,
}

impl DbConnection {
    /// Open one connection using the given configuration.
    ///
    /// Builds the TLS configuration from `config.ca_cert_path` (server
    /// certificate verification always on), assembles the driver options,
    /// and performs a single connect attempt. No retry; connect timeout is
    /// whatever the driver's defaults provide.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] for an unreadable or malformed CA
    /// bundle and [`crate::Error::Driver`] for anything the driver raises
    /// (DNS, TCP, TLS handshake, authentication).
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        async {
            let tls = TlsConfig::builder()
                .ca_cert_path(&config.ca_cert_path)
                .build()?;
            tracing::debug!(ca = %tls.ca_cert_path().display(), "loaded CA bundle");

            let opts = build_opts(config, &tls);
            let conn = Conn::new(opts).await?;

            tracing::info!(id = conn.id(), "connection established");
            Ok(Self { inner: conn })
        }
        .instrument(tracing::info_span!(
            "connect",
            host = %config.host,
            port = %config.port,
            user = %config.user,
            database = %config.database
        ))
        .await
    }

    /// Lenient acquisition: open one connection, or log and return `None`.
    ///
    /// Every failure cause (configuration, file, TLS, authentication,
    /// network) is recovered locally and collapses to the same `None`;
    /// nothing propagates to the caller. Exactly one error-level diagnostic
    /// is emitted per failed attempt.
    pub async fn acquire(config: &DbConfig) -> Option<Self> {
        match Self::connect(config).await {
            Ok(conn) => Some(conn),
            Err(err) => {
                tracing::error!("Error: {err}");
                None
            }
        }
    }

    /// Server-side thread id of this session.
    pub fn id(&self) -> u32 {
        self.inner.id()
    }

    /// Server version as reported during the handshake.
    pub fn server_version(&self) -> (u16, u16, u16) {
        self.inner.server_version()
    }

    /// Check the session is still alive by pinging the server.
    pub async fn ping(&mut self) -> Result<()> {
        self.inner.ping().await?;
        Ok(())
    }

    /// Close the connection, sending the protocol-level quit.
    pub async fn close(self) -> Result<()> {
        self.inner.disconnect().await?;
        Ok(())
    }
}

impl std::fmt::Debug for DbConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConnection")
            .field("id", &self.inner.id())
            .finish()
    }
}

/// Acquire a connection using configuration sourced from the environment.
///
/// Port of the original `get_db_connection()` helper: reads `DB_PASSWORD`
/// (via a local `.env` file if present), fixes every other parameter to the
/// Cloud Bookstore service constants, and attempts one connection. On any
/// failure it logs a diagnostic and returns `None`.
///
/// Each call builds a fresh configuration and yields an independent session;
/// nothing is cached across calls.
pub async fn acquire_connection() -> Option<DbConnection> {
    let config = DbConfig::from_env();
    DbConnection::acquire(&config).await
}

/// Assemble driver options from the configuration and TLS setup.
fn build_opts(config: &DbConfig, tls: &TlsConfig) -> Opts {
    OptsBuilder::default()
        .ip_or_hostname(config.host.clone())
        .tcp_port(config.port)
        .user(Some(config.user.clone()))
        .pass(Some(config.password.clone()))
        .db_name(Some(config.database.clone()))
        .ssl_opts(Some(tls.ssl_opts()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const FAKE_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\n\
        MIIBCgKCAQEA7bq8mPxGJzF2kQ0dQ1hYfJqz1vP0n6m3sT9XvQ4rGm8wLqN5tZxK\n\
        -----END CERTIFICATE-----\n";

    fn temp_ca(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, FAKE_CERT_PEM).expect("write temp CA file");
        path
    }

    #[test]
    fn test_build_opts_wires_all_parameters() {
        let ca = temp_ca("bookstore-db-test-opts-ca.pem");
        let config = DbConfig::builder()
            .host("db.example.com")
            .port(3306)
            .user("reader")
            .password("hunter2")
            .database("bookstore")
            .ca_cert_path(&ca)
            .build();
        let tls = TlsConfig::builder().ca_cert_path(&ca).build().unwrap();

        let opts = build_opts(&config, &tls);
        assert_eq!(opts.ip_or_hostname(), "db.example.com");
        assert_eq!(opts.tcp_port(), 3306);
        assert_eq!(opts.user(), Some("reader"));
        assert_eq!(opts.pass(), Some("hunter2"));
        assert_eq!(opts.db_name(), Some("bookstore"));
        assert!(opts.ssl_opts().is_some());

        let _ = fs::remove_file(&ca);
    }

    #[test]
    fn test_build_opts_empty_password_passes_through() {
        // A missing DB_PASSWORD becomes an empty password, handed to the
        // driver as-is; what the server does with it is its own business.
        let ca = temp_ca("bookstore-db-test-empty-pass-ca.pem");
        let config = DbConfig::builder().ca_cert_path(&ca).build();
        let tls = TlsConfig::builder().ca_cert_path(&ca).build().unwrap();

        let opts = build_opts(&config, &tls);
        assert_eq!(opts.pass(), Some(""));

        let _ = fs::remove_file(&ca);
    }

    #[tokio::test]
    async fn test_connect_bad_ca_path_is_config_error() {
        let config = DbConfig::builder()
            .ca_cert_path("/nonexistent/ca.pem")
            .build();

        let result = DbConnection::connect(&config).await;
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[tokio::test]
    async fn test_acquire_bad_ca_path_returns_none() {
        let config = DbConfig::builder()
            .ca_cert_path("/nonexistent/ca.pem")
            .build();

        assert!(DbConnection::acquire(&config).await.is_none());
    }

    #[tokio::test]
    async fn test_acquire_unreachable_host_returns_none() {
        let ca = temp_ca("bookstore-db-test-unreachable-ca.pem");
        let config = DbConfig::builder()
            .host("127.0.0.1")
            .port(1) // nothing listens here
            .ca_cert_path(&ca)
            .build();

        assert!(DbConnection::acquire(&config).await.is_none());

        let _ = fs::remove_file(&ca);
    }

    /// Writer that captures formatted log output for inspection.
    #[derive(Clone, Default)]
    struct CaptureWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_acquire_failure_emits_single_error_diagnostic() {
        let writer = CaptureWriter::default();
        let make_writer = {
            let writer = writer.clone();
            move || writer.clone()
        };
        let subscriber = tracing_subscriber::fmt()
            .with_writer(make_writer)
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tokio_test::block_on(async {
                let config = DbConfig::builder()
                    .ca_cert_path("/nonexistent/ca.pem")
                    .build();
                assert!(DbConnection::acquire(&config).await.is_none());
            });
        });

        let output = writer.contents();
        let error_lines: Vec<&str> = output.lines().filter(|l| l.contains("ERROR")).collect();
        assert_eq!(
            error_lines.len(),
            1,
            "expected exactly one error diagnostic, got: {output}"
        );
        assert!(error_lines[0].contains("Error"));
    }
}
