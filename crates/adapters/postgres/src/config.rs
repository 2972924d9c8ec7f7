//! PostgreSQL 配置模块
//!
//! 单连接配置：URL、SSL、应用名、search_path 与连接超时。
//! 网关不做连接池，也不做重试。

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use simplebank_errors::{AppError, AppResult};
use sqlx::postgres::PgConnectOptions;

/// SSL 模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// 禁用 SSL
    Disable,
    /// 允许 SSL（如果服务器支持）
    #[default]
    Prefer,
    /// 要求 SSL
    Require,
    /// 验证 CA 证书
    VerifyCa,
    /// 验证完整证书链
    VerifyFull,
}

impl SslMode {
    /// 转换为连接串中的 sslmode 值
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" | "verify_ca" => Ok(SslMode::VerifyCa),
            "verify-full" | "verify_full" => Ok(SslMode::VerifyFull),
            other => Err(AppError::config(format!("Unknown ssl mode: {}", other))),
        }
    }
}

/// PostgreSQL 配置
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// 数据库 URL
    pub url: String,
    /// Schema（写入 search_path）
    pub schema: Option<String>,
    /// SSL 模式
    pub ssl_mode: SslMode,
    /// 应用名称（用于连接标识）
    pub application_name: Option<String>,
    /// 连接超时
    pub connect_timeout: Duration,
    /// 语句缓存大小
    pub statement_cache_size: usize,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            schema: None,
            ssl_mode: SslMode::default(),
            application_name: None,
            connect_timeout: Duration::from_secs(30),
            statement_cache_size: 100,
        }
    }
}

impl PostgresConfig {
    /// 从 URL 创建配置
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 设置 Schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// 设置 SSL 模式
    pub fn with_ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = mode;
        self
    }

    /// 设置应用名称
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// 设置连接超时
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// 设置语句缓存大小
    pub fn with_statement_cache_size(mut self, size: usize) -> Self {
        self.statement_cache_size = size;
        self
    }

    /// 获取带 SSL 参数的连接 URL
    pub fn connection_url(&self) -> String {
        let mut url = self.url.clone();
        let mut params = vec![format!("sslmode={}", self.ssl_mode.as_str())];

        if let Some(ref app_name) = self.application_name {
            params.push(format!("application_name={}", app_name));
        }

        if let Some(ref schema) = self.schema {
            params.push(format!("options=--search_path%3D{}", schema));
        }

        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&params.join("&"));
        url
    }

    /// 解析为 sqlx 连接选项
    pub fn connect_options(&self) -> AppResult<PgConnectOptions> {
        let options = PgConnectOptions::from_str(&self.connection_url())
            .map_err(|e| AppError::config(format!("Invalid database url: {}", e)))?;
        Ok(options.statement_cache_capacity(self.statement_cache_size))
    }
}
