//! 结果行

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use simplebank_errors::{AppError, AppResult};

/// 列值
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Decimal(Decimal),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Bool(_) => "BOOL",
            SqlValue::Int(_) => "INT",
            SqlValue::Text(_) => "TEXT",
            SqlValue::Date(_) => "DATE",
            SqlValue::Decimal(_) => "NUMERIC",
        }
    }
}

/// 与 PostgreSQL 的文本表示一致（NUMERIC 保留小数位数）
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => Ok(()),
            SqlValue::Bool(v) => write!(f, "{}", if *v { "t" } else { "f" }),
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::Text(v) => f.write_str(v),
            SqlValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            SqlValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// 一行结果：按列顺序保存 (列名, 值)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    columns: Vec<(String, SqlValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一列
    pub fn with(mut self, name: impl Into<String>, value: SqlValue) -> Self {
        self.columns.push((name.into(), value));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: SqlValue) {
        self.columns.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// 按位置取值（从 0 开始）
    pub fn get(&self, index: usize) -> AppResult<&SqlValue> {
        self.columns
            .get(index)
            .map(|(_, v)| v)
            .ok_or_else(|| AppError::decode(format!("Column index {} out of range", index)))
    }

    /// 按列名取值
    pub fn get_named(&self, name: &str) -> AppResult<&SqlValue> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| AppError::decode(format!("Column {:?} not found", name)))
    }

    /// 第一列；标量调用的结果
    pub fn scalar(&self) -> AppResult<&SqlValue> {
        self.get(0)
    }
}

/// 非空列值的类型化读取
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: &SqlValue) -> AppResult<Self>;
}

impl FromSqlValue for i32 {
    fn from_sql_value(value: &SqlValue) -> AppResult<Self> {
        match value {
            SqlValue::Int(v) => i32::try_from(*v)
                .map_err(|_| AppError::decode(format!("Integer {} does not fit in INT4", v))),
            other => Err(mismatch("INT", other)),
        }
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> AppResult<Self> {
        match value {
            SqlValue::Null => Err(mismatch("TEXT", value)),
            other => Ok(other.to_string()),
        }
    }
}

impl FromSqlValue for NaiveDate {
    fn from_sql_value(value: &SqlValue) -> AppResult<Self> {
        match value {
            SqlValue::Date(v) => Ok(*v),
            SqlValue::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| AppError::decode(format!("Invalid date {:?}: {}", s, e))),
            other => Err(mismatch("DATE", other)),
        }
    }
}

impl FromSqlValue for Decimal {
    fn from_sql_value(value: &SqlValue) -> AppResult<Self> {
        match value {
            SqlValue::Decimal(v) => Ok(*v),
            SqlValue::Int(v) => Ok(Decimal::from(*v)),
            SqlValue::Text(s) => s
                .parse::<Decimal>()
                .map_err(|e| AppError::decode(format!("Invalid numeric {:?}: {}", s, e))),
            other => Err(mismatch("NUMERIC", other)),
        }
    }
}

fn mismatch(expected: &str, actual: &SqlValue) -> AppError {
    AppError::decode(format!(
        "Expected {}, found {}",
        expected,
        actual.type_name()
    ))
}

impl ResultRow {
    /// 按位置读取并转换
    pub fn try_get<T: FromSqlValue>(&self, index: usize) -> AppResult<T> {
        T::from_sql_value(self.get(index)?)
    }

    /// 按列名读取并转换
    pub fn try_get_named<T: FromSqlValue>(&self, name: &str) -> AppResult<T> {
        T::from_sql_value(self.get_named(name)?)
            .map_err(|e| AppError::decode(format!("Column {:?}: {}", name, e)))
    }
}
