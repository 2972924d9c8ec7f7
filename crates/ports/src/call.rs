//! 存储函数调用描述

use chrono::NaiveDate;
use rust_decimal::Decimal;
use simplebank_errors::{AppError, AppResult};

/// 位置参数
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
    /// 以 ISO-8601 文本绑定，SQL 中通过 `CAST($n AS DATE)` 转换
    Date(NaiveDate),
    Decimal(Decimal),
}

impl SqlParam {
    /// 参数在 SQL 中的占位符写法
    fn placeholder(&self, position: usize) -> String {
        match self {
            SqlParam::Date(_) => format!("CAST(${} AS DATE)", position),
            _ => format!("${}", position),
        }
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        SqlParam::Date(v)
    }
}

impl From<Decimal> for SqlParam {
    fn from(v: Decimal) -> Self {
        SqlParam::Decimal(v)
    }
}

/// 返回形态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnShape {
    /// 单列标量：`SELECT fn(...)`
    #[default]
    Scalar,
    /// 多列结果集：`SELECT * FROM fn(...)`
    Table,
}

/// 一次存储函数调用
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    name: String,
    shape: ReturnShape,
    params: Vec<SqlParam>,
}

impl FunctionCall {
    /// 标量调用
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: ReturnShape::Scalar,
            params: Vec::new(),
        }
    }

    /// 结果集调用
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: ReturnShape::Table,
            params: Vec::new(),
        }
    }

    /// 追加一个位置参数
    pub fn arg(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> ReturnShape {
        self.shape
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// 生成参数化 SQL
    ///
    /// 函数名会被直接拼接进语句，所以只接受普通标识符，或 `schema.name` 形式。
    pub fn to_sql(&self) -> AppResult<String> {
        if !is_function_name(&self.name) {
            return Err(AppError::validation(format!(
                "Illegal function name: {:?}",
                self.name
            )));
        }

        let args = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| p.placeholder(i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(match self.shape {
            ReturnShape::Scalar => format!("SELECT {}({})", self.name, args),
            ReturnShape::Table => format!("SELECT * FROM {}({})", self.name, args),
        })
    }
}

fn is_function_name(name: &str) -> bool {
    let mut parts = name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(func), None, None) => is_identifier(func),
        (Some(schema), Some(func), None) => is_identifier(schema) && is_identifier(func),
        _ => false,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
