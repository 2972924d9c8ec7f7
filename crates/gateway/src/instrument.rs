//! 调用指标

use std::time::Duration;

use metrics::{counter, histogram};
use simplebank_errors::AppResult;

use crate::Operation;

pub(crate) const CALLS_TOTAL: &str = "bank_gateway_calls_total";
pub(crate) const CALL_DURATION: &str = "bank_gateway_call_duration_seconds";

/// 记录一次调用的结果与耗时
pub(crate) fn record_call<T>(operation: Operation, outcome: &AppResult<T>, elapsed: Duration) {
    let result = match outcome {
        Ok(_) => "ok",
        Err(e) => e.kind().as_str(),
    };

    counter!(CALLS_TOTAL, "function" => operation.function_name(), "outcome" => result)
        .increment(1);
    histogram!(CALL_DURATION, "function" => operation.function_name())
        .record(elapsed.as_secs_f64());
}
