//! 哨兵值兼容层
//!
//! 为仍按旧约定工作的调用方保留原有返回值：所有错误都被记录日志，
//! 然后折叠成固定的哨兵值（`-1`、固定字符串或只含 `error` 键的映射）。

use std::collections::HashMap;

use simplebank_domain::{
    AccountIdentity, AccountNumber, Money, NewAccount, ProfileUpdate, TransferRequest,
};
use simplebank_errors::AppError;
use simplebank_ports::DatabaseSession;
use tracing::error;

use crate::{BankGateway, Operation};

pub const CREATE_ACCOUNT_FAILED: i32 = -1;
pub const CLOSE_ACCOUNT_FAILED: &str = "COULD NOT CLOSE THE CLIENT ACCOUNT";
pub const ACCOUNT_INFO_FAILED: &str = "COULD NOT LOCATE THE ACCOUNT INFO";
pub const UPDATE_ACCOUNT_FAILED: &str = "ERROR: COULD NOT UPDATE THE USER DATA";
pub const DEPOSIT_FAILED: &str = "ERROR: COULD NOT COMPLETE THE DEPOSIT";
pub const WITHDRAW_FAILED: &str = "ERROR: COULD NOT WITHDRAW THE MONEY";
pub const TRANSFER_FAILED: &str = "ERROR: MONEY TRANSFERENCE HAS FAILED";

/// 账户资料查询失败时映射中唯一的键
pub const ERROR_KEY: &str = "error";

/// 返回哨兵值的网关
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelGateway {
    inner: BankGateway,
}

impl SentinelGateway {
    pub fn new(inner: BankGateway) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &BankGateway {
        &self.inner
    }

    pub async fn create_account<S: DatabaseSession>(
        &self,
        session: S,
        account: &NewAccount,
    ) -> i32 {
        match self.inner.create_account(session, account).await {
            Ok(number) => number.0,
            Err(e) => {
                log_failure(Operation::CreateAccount, &e);
                CREATE_ACCOUNT_FAILED
            }
        }
    }

    pub async fn close_account<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        identity: &AccountIdentity,
    ) -> String {
        self.inner
            .close_account(session, account, identity)
            .await
            .map(|c| c.into_inner())
            .unwrap_or_else(|e| fallback(Operation::CloseAccount, &e, CLOSE_ACCOUNT_FAILED))
    }

    pub async fn get_account_info<S: DatabaseSession>(
        &self,
        session: S,
        identity: &AccountIdentity,
    ) -> HashMap<String, String> {
        match self.inner.get_account_fields(session, identity).await {
            Ok(fields) => fields.into_iter().collect(),
            Err(e) => {
                log_failure(Operation::GetAccountInfo, &e);
                HashMap::from([(ERROR_KEY.to_string(), ACCOUNT_INFO_FAILED.to_string())])
            }
        }
    }

    pub async fn update_account_info<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        identity: &AccountIdentity,
        update: &ProfileUpdate,
    ) -> String {
        self.inner
            .update_account_info(session, account, identity, update)
            .await
            .map(|c| c.into_inner())
            .unwrap_or_else(|e| fallback(Operation::UpdateAccountInfo, &e, UPDATE_ACCOUNT_FAILED))
    }

    pub async fn deposit_money<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        amount: Money,
    ) -> String {
        self.inner
            .deposit_money(session, account, amount)
            .await
            .map(|receipt| receipt.to_string())
            .unwrap_or_else(|e| fallback(Operation::DepositMoney, &e, DEPOSIT_FAILED))
    }

    pub async fn withdraw_money<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        amount: Money,
    ) -> String {
        self.inner
            .withdraw_money(session, account, amount)
            .await
            .map(|c| c.into_inner())
            .unwrap_or_else(|e| fallback(Operation::WithdrawMoney, &e, WITHDRAW_FAILED))
    }

    pub async fn transfer_money<S: DatabaseSession>(
        &self,
        session: S,
        transfer: &TransferRequest,
    ) -> String {
        self.inner
            .transfer_money(session, transfer)
            .await
            .map(|c| c.into_inner())
            .unwrap_or_else(|e| fallback(Operation::TransferMoney, &e, TRANSFER_FAILED))
    }
}

fn log_failure(operation: Operation, err: &AppError) {
    error!(
        function = operation.function_name(),
        kind = err.kind().as_str(),
        error = %err,
        "Stored function call failed"
    );
}

fn fallback(operation: Operation, err: &AppError, sentinel: &str) -> String {
    log_failure(operation, err);
    sentinel.to_string()
}
