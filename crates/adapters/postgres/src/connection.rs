//! PostgreSQL 连接提供者

use async_trait::async_trait;
use simplebank_errors::{AppError, AppResult};
use simplebank_ports::ConnectionSupplier;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::debug;

use crate::{PgSession, PostgresConfig};

/// 每次 `acquire` 打开一个新连接，不做池化
#[derive(Debug, Clone)]
pub struct PgConnector {
    config: PostgresConfig,
    options: PgConnectOptions,
}

impl PgConnector {
    pub fn new(config: PostgresConfig) -> AppResult<Self> {
        let options = config.connect_options()?;
        Ok(Self { config, options })
    }

    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    /// 打开一个原始连接
    pub async fn connect(&self) -> AppResult<PgConnection> {
        let conn = tokio::time::timeout(
            self.config.connect_timeout,
            PgConnection::connect_with(&self.options),
        )
        .await
        .map_err(|_| {
            AppError::connection(format!(
                "Timed out after {:?} connecting to {}:{}",
                self.config.connect_timeout,
                self.options.get_host(),
                self.options.get_port()
            ))
        })?
        .map_err(|e| AppError::connection(format!("Failed to connect: {}", e)))?;

        debug!(
            host = self.options.get_host(),
            port = self.options.get_port(),
            "PostgreSQL connection opened"
        );
        Ok(conn)
    }
}

#[async_trait]
impl ConnectionSupplier for PgConnector {
    type Session = PgSession;

    async fn acquire(&self) -> AppResult<PgSession> {
        self.connect().await.map(PgSession::new)
    }
}
