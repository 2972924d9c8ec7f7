//! simplebank-errors - 统一错误处理
//!
//! 网关的每个操作都返回 `AppResult<T>`，调用方通过 `ErrorKind` 区分
//! “存储过程没有返回结果”与“驱动/网络故障”，而不是去匹配字符串。

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No result: {0}")]
    NoResult(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// 错误类别，供调用方做分支判断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 存储过程没有返回行（业务拒绝，例如账户不存在）
    NoResult,
    /// 执行期间的驱动、SQL 或网络故障
    Database,
    /// 无法建立连接
    Connection,
    /// BEGIN / COMMIT 失败
    Transaction,
    /// 结果行结构或列类型不符合预期
    Decode,
    /// 调用本身不合法
    Validation,
    /// 配置加载失败
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoResult => "no_result",
            ErrorKind::Database => "database",
            ErrorKind::Connection => "connection",
            ErrorKind::Transaction => "transaction",
            ErrorKind::Decode => "decode",
            ErrorKind::Validation => "validation",
            ErrorKind::Config => "config",
        }
    }
}

impl AppError {
    pub fn no_result(msg: impl Into<String>) -> Self {
        Self::NoResult(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoResult(_) => ErrorKind::NoResult,
            Self::Database(_) => ErrorKind::Database,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Transaction(_) => ErrorKind::Transaction,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// 是否为业务层面的拒绝（而非基础设施故障）
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::NoResult(_))
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AppError::no_result("x").kind(), ErrorKind::NoResult);
        assert_eq!(AppError::database("x").kind(), ErrorKind::Database);
        assert_eq!(AppError::connection("x").kind(), ErrorKind::Connection);
        assert_eq!(AppError::transaction("x").kind(), ErrorKind::Transaction);
        assert_eq!(AppError::decode("x").kind(), ErrorKind::Decode);
        assert_eq!(AppError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(AppError::config("x").kind(), ErrorKind::Config);
    }

    #[test]
    fn test_rejection_vs_fault() {
        assert!(AppError::no_result("account not found").is_rejection());
        assert!(!AppError::database("connection reset").is_rejection());
    }

    #[test]
    fn test_display() {
        let err = AppError::database("relation does not exist");
        assert_eq!(err.to_string(), "Database error: relation does not exist");
        assert_eq!(err.kind().as_str(), "database");
    }
}
