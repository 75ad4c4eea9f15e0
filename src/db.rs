use std::time::Duration;

use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::DbSettings;

/// Storage failures. Every one of them ends up as a failure envelope.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("could not connect to database: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Query(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) => DbError::Query(db_err.message().to_string()),
            // server went away mid-statement
            sqlx::Error::Io(_) | sqlx::Error::Protocol(_) | sqlx::Error::Tls(_) => {
                DbError::Query(e.to_string())
            }
            _ => DbError::Unexpected(e.to_string()),
        }
    }
}

/// Opens one MySQL connection per operation. No pooling.
#[derive(Clone)]
pub struct ConnectionProvider {
    options: MySqlConnectOptions,
    connect_timeout: Duration,
}

impl ConnectionProvider {
    pub fn new(settings: &DbSettings, connect_timeout: Duration) -> Self {
        let (host, port) = settings.host_and_port();
        let options = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.name);

        Self {
            options,
            connect_timeout,
        }
    }

    /// The caller owns the returned connection and must close it.
    pub async fn acquire(&self) -> Result<MySqlConnection, DbError> {
        let connect = MySqlConnection::connect_with(&self.options);

        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(conn)) => {
                debug!("Database connection opened");
                Ok(conn)
            }
            Ok(Err(e)) => {
                error!(error = %e, "Failed to connect to database");
                Err(DbError::Connection(e.to_string()))
            }
            Err(_) => {
                let secs = self.connect_timeout.as_secs();
                error!(timeout_secs = secs, "Database connection timed out");
                Err(DbError::Connection(format!("timed out after {secs}s")))
            }
        }
    }
}
