//! 基于 sqlx 的 PostgreSQL 会话

use async_trait::async_trait;
use simplebank_errors::{AppError, AppResult};
use simplebank_ports::{DatabaseSession, FunctionCall, ResultRow, SqlParam, TransactionOptions};
use sqlx::{Connection, PgConnection};
use tracing::{debug, warn};

use crate::decode::decode_row;

/// 独占一个 `PgConnection` 的会话
pub struct PgSession {
    pub(crate) conn: PgConnection,
    in_transaction: bool,
}

impl PgSession {
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn,
            in_transaction: false,
        }
    }

    /// 是否处于显式事务中
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    async fn execute_control(&mut self, sql: &str) -> Result<(), sqlx::Error> {
        sqlx::query(sql).execute(&mut self.conn).await.map(|_| ())
    }
}

#[async_trait]
impl DatabaseSession for PgSession {
    async fn call_function(&mut self, call: &FunctionCall) -> AppResult<Option<ResultRow>> {
        let sql = call.to_sql()?;
        debug!(function = call.name(), params = call.params().len(), "Calling stored function");

        let mut query = sqlx::query(&sql);
        for param in call.params() {
            query = match param {
                SqlParam::Int(v) => query.bind(*v),
                SqlParam::Text(v) => query.bind(v.as_str()),
                SqlParam::Date(v) => query.bind(v.format("%Y-%m-%d").to_string()),
                SqlParam::Decimal(v) => query.bind(*v),
            };
        }

        let row = query
            .fetch_optional(&mut self.conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to call {}: {}", call.name(), e)))?;

        row.as_ref().map(decode_row).transpose()
    }

    async fn begin(&mut self, options: &TransactionOptions) -> AppResult<()> {
        if self.in_transaction {
            return Err(AppError::transaction("Transaction already in progress"));
        }

        self.execute_control("BEGIN")
            .await
            .map_err(|e| AppError::transaction(format!("Failed to begin transaction: {}", e)))?;
        self.in_transaction = true;

        if let Err(e) = self.execute_control(&options.to_sql()).await {
            self.rollback().await.ok();
            return Err(AppError::transaction(format!(
                "Failed to set transaction options: {}",
                e
            )));
        }

        debug!(isolation = options.isolation_level.as_sql(), "Transaction started");
        Ok(())
    }

    async fn commit(&mut self) -> AppResult<()> {
        // COMMIT 失败时 PostgreSQL 也会结束事务
        self.in_transaction = false;
        self.execute_control("COMMIT")
            .await
            .map_err(|e| AppError::transaction(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(&mut self) -> AppResult<()> {
        self.in_transaction = false;
        self.execute_control("ROLLBACK")
            .await
            .map_err(|e| AppError::transaction(format!("Failed to rollback transaction: {}", e)))
    }

    async fn close(mut self) -> AppResult<()> {
        if self.in_transaction {
            warn!("Closing session with an open transaction, rolling back");
            if let Err(e) = self.rollback().await {
                warn!(error = %e, "Rollback before close failed");
            }
        }

        self.conn
            .close()
            .await
            .map_err(|e| AppError::database(format!("Failed to close connection: {}", e)))
    }
}
