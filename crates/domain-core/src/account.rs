//! 账户相关值对象

use std::collections::BTreeMap;

use chrono::NaiveDate;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::Money;

/// 账号（由数据库生成）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
#[serde(transparent)]
pub struct AccountNumber(pub i32);

/// 社会保障号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
#[serde(transparent)]
pub struct SocialNumber(pub i32);

/// 账户身份三元组
///
/// 三项必须与数据库中的账户完全一致，存储过程才会授权操作。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub social_number: SocialNumber,
    pub birthdate: NaiveDate,
    pub mother_full_name: String,
}

impl AccountIdentity {
    pub fn new(
        social_number: impl Into<SocialNumber>,
        birthdate: NaiveDate,
        mother_full_name: impl Into<String>,
    ) -> Self {
        Self {
            social_number: social_number.into(),
            birthdate,
            mother_full_name: mother_full_name.into(),
        }
    }
}

/// 开户请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub identity: AccountIdentity,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub opening_balance: Money,
}

/// 可修改的用户资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

/// 转账请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: AccountNumber,
    pub destination: AccountNumber,
    pub amount: Money,
    /// 转出方身份
    pub sender_identity: AccountIdentity,
}

/// 账户资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub account_number: AccountNumber,
    pub social_number: SocialNumber,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub mother_full_name: String,
    pub address: String,
    pub balance: Money,
}

/// 账户资料的字段标签
pub mod labels {
    pub const ACCOUNT_NUMBER: &str = "Account Number";
    pub const SOCIAL_NUMBER: &str = "Social Number";
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const BIRTHDATE: &str = "Birthdate";
    pub const MOTHER_FULL_NAME: &str = "Mother Full Name";
    pub const ADDRESS: &str = "Address";
    pub const ACCOUNT_BALANCE: &str = "Account Balance";

    pub const ALL: [&str; 8] = [
        ACCOUNT_NUMBER,
        SOCIAL_NUMBER,
        FIRST_NAME,
        LAST_NAME,
        BIRTHDATE,
        MOTHER_FULL_NAME,
        ADDRESS,
        ACCOUNT_BALANCE,
    ];
}

impl AccountProfile {
    pub fn identity(&self) -> AccountIdentity {
        AccountIdentity {
            social_number: self.social_number,
            birthdate: self.birthdate,
            mother_full_name: self.mother_full_name.clone(),
        }
    }

    /// 以 “标签 → 文本” 的形式输出八个字段
    pub fn labeled_fields(&self) -> BTreeMap<String, String> {
        let fields = [
            (labels::ACCOUNT_NUMBER, self.account_number.to_string()),
            (labels::SOCIAL_NUMBER, self.social_number.to_string()),
            (labels::FIRST_NAME, self.first_name.clone()),
            (labels::LAST_NAME, self.last_name.clone()),
            (labels::BIRTHDATE, self.birthdate.format("%Y-%m-%d").to_string()),
            (labels::MOTHER_FULL_NAME, self.mother_full_name.clone()),
            (labels::ADDRESS, self.address.clone()),
            (labels::ACCOUNT_BALANCE, self.balance.to_string()),
        ];

        fields
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect()
    }
}
