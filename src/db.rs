//! Connection handling for the scheduler's metadata store.

use anyhow::Context as _;
use native_tls::{Certificate, TlsConnector};
use postgres_native_tls::MakeTlsConnector;
use std::env;

pub mod runs;

/// Opens a client against the Meltano system database named by
/// `MELTANO_DATABASE_URI`. When `MELTANO_DATABASE_CA_CERT` points at a PEM
/// bundle the connection is made over TLS.
pub async fn connect_from_env() -> anyhow::Result<tokio_postgres::Client> {
    let db_url = env::var("MELTANO_DATABASE_URI").context("MELTANO_DATABASE_URI is missing")?;
    let ca_cert = env::var("MELTANO_DATABASE_CA_CERT").ok();
    connect(&db_url, ca_cert.as_deref()).await
}

pub async fn connect(
    db_url: &str,
    ca_cert: Option<&str>,
) -> anyhow::Result<tokio_postgres::Client> {
    if let Some(path) = ca_cert {
        let pem = std::fs::read(path)
            .with_context(|| format!("reading CA certificate from {}", path))?;
        let cert = Certificate::from_pem(&pem).context("parsing CA certificate")?;
        let connector = TlsConnector::builder()
            .add_root_certificate(cert)
            .build()
            .context("building TLS connector")?;
        let connector = MakeTlsConnector::new(connector);

        let (client, connection) = tokio_postgres::connect(db_url, connector)
            .await
            .context("failed to connect to the metadata store")?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("database connection error: {}", e);
            }
        });

        Ok(client)
    } else {
        let (client, connection) = tokio_postgres::connect(db_url, tokio_postgres::NoTls)
            .await
            .context("failed to connect to the metadata store")?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("database connection error: {}", e);
            }
        });

        Ok(client)
    }
}
