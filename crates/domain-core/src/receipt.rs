//! 操作回执

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::Money;

/// 存储过程原样返回的确认信息
///
/// 例如 “账户已关闭” 或 “余额不足”，内容由数据库决定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Confirmation(pub String);

impl Confirmation {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 存款回执
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{amount} DEPOSITED, YOUR NEW ACCOUNT BALANCE IS: {new_balance}")]
pub struct DepositReceipt {
    pub amount: Money,
    pub new_balance: Money,
}
