//! 连接作用域与事务作用域

use simplebank_errors::{AppError, AppResult};
use simplebank_ports::{DatabaseSession, FunctionCall, ResultRow, TransactionOptions};
use tracing::{debug, info, warn};

/// 接管一个会话，保证它在作用域结束时被释放
///
/// 正常路径通过 `release` 关闭连接；若作用域在释放前被丢弃（panic 或 future 被取消），
/// 会话自身的 `Drop` 负责断开底层连接。
pub struct ConnectionScope<S: DatabaseSession> {
    session: Option<S>,
    label: &'static str,
}

impl<S: DatabaseSession> ConnectionScope<S> {
    pub fn new(session: S, label: &'static str) -> Self {
        Self {
            session: Some(session),
            label,
        }
    }

    pub fn session(&mut self) -> AppResult<&mut S> {
        let label = self.label;
        self.session
            .as_mut()
            .ok_or_else(|| AppError::connection(format!("{}: session already released", label)))
    }

    /// 关闭连接；关闭失败只记录日志
    pub async fn release(mut self) {
        if let Some(session) = self.session.take() {
            match session.close().await {
                Ok(()) => debug!(scope = self.label, "Connection closed"),
                Err(e) => warn!(scope = self.label, error = %e, "Failed to close connection"),
            }
        }
    }
}

impl<S: DatabaseSession> Drop for ConnectionScope<S> {
    fn drop(&mut self) {
        if self.session.is_some() {
            warn!(
                scope = self.label,
                "Connection scope dropped before release, connection closed without handshake"
            );
        }
    }
}

/// 在会话上执行一次调用；给定 `options` 时包裹在显式事务中
///
/// 调用成功（包括零行）后才提交；任何失败（包括 BEGIN 失败）都先回滚。
pub async fn run_in_scope<S: DatabaseSession>(
    session: &mut S,
    call: &FunctionCall,
    options: Option<&TransactionOptions>,
) -> AppResult<Option<ResultRow>> {
    let Some(options) = options else {
        return session.call_function(call).await;
    };

    if let Err(e) = session.begin(options).await {
        rollback_quietly(session, call.name()).await;
        return Err(e);
    }

    let row = match session.call_function(call).await {
        Ok(row) => row,
        Err(e) => {
            rollback_quietly(session, call.name()).await;
            return Err(e);
        }
    };

    if let Err(e) = session.commit().await {
        rollback_quietly(session, call.name()).await;
        return Err(e);
    }

    info!(function = call.name(), "Transaction committed");
    Ok(row)
}

async fn rollback_quietly<S: DatabaseSession>(session: &mut S, function: &str) {
    match session.rollback().await {
        Ok(()) => warn!(function, "Transaction rolled back"),
        Err(e) => warn!(function, error = %e, "Rollback failed"),
    }
}

/// 接管会话、执行调用并始终释放连接
pub async fn execute<S: DatabaseSession>(
    session: S,
    label: &'static str,
    call: &FunctionCall,
    options: Option<&TransactionOptions>,
) -> AppResult<Option<ResultRow>> {
    let mut scope = ConnectionScope::new(session, label);
    let outcome = match scope.session() {
        Ok(session) => run_in_scope(session, call, options).await,
        Err(e) => Err(e),
    };
    scope.release().await;
    outcome
}
