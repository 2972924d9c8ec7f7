//! 数据库会话 trait 定义

use async_trait::async_trait;
use simplebank_errors::AppResult;

use crate::{FunctionCall, ResultRow, TransactionOptions};

/// 单个已打开的数据库连接
///
/// 网关以值的方式接管会话，并负责在调用结束时关闭它。
/// 同一会话不会被并发使用。
#[async_trait]
pub trait DatabaseSession: Send {
    /// 执行存储函数，最多返回一行
    async fn call_function(&mut self, call: &FunctionCall) -> AppResult<Option<ResultRow>>;

    /// 关闭自动提交，开始显式事务
    async fn begin(&mut self, options: &TransactionOptions) -> AppResult<()>;

    /// 提交事务
    async fn commit(&mut self) -> AppResult<()>;

    /// 回滚事务
    async fn rollback(&mut self) -> AppResult<()>;

    /// 关闭连接
    async fn close(self) -> AppResult<()>
    where
        Self: Sized;
}

/// 连接提供者：每次调用返回一个新打开的会话
#[async_trait]
pub trait ConnectionSupplier: Send + Sync {
    type Session: DatabaseSession;

    async fn acquire(&self) -> AppResult<Self::Session>;
}
