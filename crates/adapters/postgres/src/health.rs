//! PostgreSQL 健康检查模块

use std::time::{Duration, Instant};

use simplebank_errors::{AppError, AppResult};
use tracing::{debug, error};

use crate::PgSession;

/// 健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    /// 是否健康
    pub healthy: bool,
    /// 延迟（毫秒）
    pub latency_ms: Option<u64>,
    /// 错误信息
    pub error: Option<String>,
    /// 数据库版本
    pub db_version: Option<String>,
}

/// 在一个会话上执行 `SELECT version()`
pub async fn check_connection(session: &mut PgSession, timeout: Duration) -> HealthCheckResult {
    let start = Instant::now();

    match tokio::time::timeout(timeout, server_version(session)).await {
        Ok(Ok(db_version)) => {
            let latency = start.elapsed().as_millis() as u64;
            debug!(latency_ms = latency, "PostgreSQL health check passed");
            HealthCheckResult {
                healthy: true,
                latency_ms: Some(latency),
                error: None,
                db_version: Some(db_version),
            }
        }
        Ok(Err(e)) => {
            error!(error = %e, "PostgreSQL health check failed");
            HealthCheckResult {
                healthy: false,
                latency_ms: None,
                error: Some(e.to_string()),
                db_version: None,
            }
        }
        Err(_) => {
            error!("PostgreSQL health check timed out");
            HealthCheckResult {
                healthy: false,
                latency_ms: None,
                error: Some("Health check timed out".to_string()),
                db_version: None,
            }
        }
    }
}

async fn server_version(session: &mut PgSession) -> AppResult<String> {
    let row: (String,) = sqlx::query_as("SELECT version()")
        .fetch_one(&mut session.conn)
        .await
        .map_err(|e| AppError::database(format!("Health check failed: {}", e)))?;

    Ok(row.0)
}
