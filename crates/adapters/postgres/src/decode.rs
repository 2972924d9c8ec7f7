//! PgRow → ResultRow

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use simplebank_errors::{AppError, AppResult};
use simplebank_ports::{ResultRow, SqlValue};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

pub(crate) fn decode_row(row: &PgRow) -> AppResult<ResultRow> {
    let mut out = ResultRow::new();
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.type_info().name())
            .map_err(|e| AppError::decode(format!("Column {:?}: {}", column.name(), e)))?;
        out.push(column.name(), value);
    }
    Ok(out)
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> AppResult<SqlValue> {
    let decoded = match type_name {
        "VOID" => return Ok(SqlValue::Null),
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .map(|v| v.map(SqlValue::Bool)),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .map(|v| v.map(|n| SqlValue::Int(n.into()))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .map(|v| v.map(|n| SqlValue::Int(n.into()))),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .map(|v| v.map(SqlValue::Int)),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)
            .map(|v| v.map(SqlValue::Decimal)),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .map(|v| v.map(SqlValue::Date)),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)
            .map(|v| v.map(SqlValue::Text)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map(|v| v.map(|n| SqlValue::Text(n.to_string()))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .map(|v| v.map(|n| SqlValue::Text(n.to_string()))),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .map(|v| {
                v.map(|t| SqlValue::Text(t.format("%Y-%m-%d %H:%M:%S%.f").to_string()))
            }),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map(|v| v.map(|t| SqlValue::Text(t.to_rfc3339()))),
        other => return decode_as_text(row, index, other),
    };

    decoded
        .map(|v| v.unwrap_or(SqlValue::Null))
        .map_err(|e| AppError::decode(e.to_string()))
}

/// 其余类型按原始文本读取；二进制格式无法解释时报错
fn decode_as_text(row: &PgRow, index: usize, type_name: &str) -> AppResult<SqlValue> {
    let raw = row
        .try_get_raw(index)
        .map_err(|e| AppError::decode(e.to_string()))?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }

    raw.as_str()
        .map(|text| SqlValue::Text(text.to_string()))
        .map_err(|e| AppError::decode(format!("Unsupported column type {}: {}", type_name, e)))
}
