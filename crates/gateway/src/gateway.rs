//! 银行网关：七个类型化操作

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use simplebank_domain::{
    AccountIdentity, AccountNumber, AccountProfile, Confirmation, DepositReceipt, Money,
    NewAccount, ProfileUpdate, SocialNumber, TransferRequest, labels,
};
use simplebank_errors::{AppError, AppResult};
use simplebank_ports::{DatabaseSession, FromSqlValue, FunctionCall, ResultRow};

use crate::instrument::record_call;
use crate::{GatewayOptions, Operation, execute};

/// `get_account_info` 返回的列名
pub mod columns {
    pub const ACCOUNT_NUMBER: &str = "account_number";
    pub const SOCIAL_NUMBER: &str = "account_user_social_number";
    pub const FIRST_NAME: &str = "account_user_first_name";
    pub const LAST_NAME: &str = "account_user_last_name";
    pub const BIRTHDATE: &str = "account_user_birthdate";
    pub const MOTHER_FULL_NAME: &str = "account_user_mother_full_name";
    pub const ADDRESS: &str = "account_user_address";
    pub const ACCOUNT_BALANCE: &str = "account_balance";

    /// 字段标签与列名的对应关系，按输出顺序排列
    pub const LABELED: [(&str, &str); 8] = [
        (super::labels::ACCOUNT_NUMBER, ACCOUNT_NUMBER),
        (super::labels::SOCIAL_NUMBER, SOCIAL_NUMBER),
        (super::labels::FIRST_NAME, FIRST_NAME),
        (super::labels::LAST_NAME, LAST_NAME),
        (super::labels::BIRTHDATE, BIRTHDATE),
        (super::labels::MOTHER_FULL_NAME, MOTHER_FULL_NAME),
        (super::labels::ADDRESS, ADDRESS),
        (super::labels::ACCOUNT_BALANCE, ACCOUNT_BALANCE),
    ];
}

/// 存储过程网关
///
/// 不持有可变状态：每个操作接管调用方传入的连接，并在返回前关闭它。
#[derive(Debug, Clone, Copy, Default)]
pub struct BankGateway {
    options: GatewayOptions,
}

impl BankGateway {
    pub fn new(options: GatewayOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// 开户，返回数据库生成的账号
    pub async fn create_account<S: DatabaseSession>(
        &self,
        session: S,
        account: &NewAccount,
    ) -> AppResult<AccountNumber> {
        let identity = &account.identity;
        let call = FunctionCall::scalar(Operation::CreateAccount.function_name())
            .arg(identity.social_number.0)
            .arg(account.first_name.as_str())
            .arg(account.last_name.as_str())
            .arg(identity.birthdate)
            .arg(identity.mother_full_name.as_str())
            .arg(account.address.as_str())
            .arg(account.opening_balance.amount());

        let row = self.invoke(Operation::CreateAccount, session, call).await?;
        scalar::<i32>(Operation::CreateAccount, &row).map(AccountNumber)
    }

    /// 销户；返回数据库的确认信息（例如余额不为零时的提示）
    pub async fn close_account<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        identity: &AccountIdentity,
    ) -> AppResult<Confirmation> {
        let call = FunctionCall::scalar(Operation::CloseAccount.function_name())
            .arg(account.0)
            .arg(identity.social_number.0)
            .arg(identity.birthdate)
            .arg(identity.mother_full_name.as_str());

        self.confirmation(Operation::CloseAccount, session, call).await
    }

    /// 按身份三元组查询账户资料
    pub async fn get_account_info<S: DatabaseSession>(
        &self,
        session: S,
        identity: &AccountIdentity,
    ) -> AppResult<AccountProfile> {
        let call = account_info_call(identity);
        let row = self.invoke(Operation::GetAccountInfo, session, call).await?;
        profile_from_row(&row)
    }

    /// 以 “标签 → 文本” 的形式查询账户资料
    ///
    /// 不做类型转换：任何列类型都按文本输出，NULL 输出为空字符串。
    /// 只有零行（或缺列）才会失败。
    pub async fn get_account_fields<S: DatabaseSession>(
        &self,
        session: S,
        identity: &AccountIdentity,
    ) -> AppResult<BTreeMap<String, String>> {
        let call = account_info_call(identity);
        let row = self.invoke(Operation::GetAccountInfo, session, call).await?;
        labeled_text(&row)
    }

    /// 修改姓名与地址
    pub async fn update_account_info<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        identity: &AccountIdentity,
        update: &ProfileUpdate,
    ) -> AppResult<Confirmation> {
        let call = FunctionCall::scalar(Operation::UpdateAccountInfo.function_name())
            .arg(account.0)
            .arg(identity.social_number.0)
            .arg(identity.birthdate)
            .arg(identity.mother_full_name.as_str())
            .arg(update.first_name.as_str())
            .arg(update.last_name.as_str())
            .arg(update.address.as_str());

        self.confirmation(Operation::UpdateAccountInfo, session, call).await
    }

    /// 存款，返回存入金额与新余额
    pub async fn deposit_money<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        amount: Money,
    ) -> AppResult<DepositReceipt> {
        let call = FunctionCall::scalar(Operation::DepositMoney.function_name())
            .arg(account.0)
            .arg(amount.amount());

        let row = self.invoke(Operation::DepositMoney, session, call).await?;
        let new_balance = scalar::<Decimal>(Operation::DepositMoney, &row)?;

        Ok(DepositReceipt {
            amount,
            new_balance: Money::new(new_balance),
        })
    }

    /// 取款；余额不足时数据库返回相应提示
    pub async fn withdraw_money<S: DatabaseSession>(
        &self,
        session: S,
        account: AccountNumber,
        amount: Money,
    ) -> AppResult<Confirmation> {
        let call = FunctionCall::scalar(Operation::WithdrawMoney.function_name())
            .arg(account.0)
            .arg(amount.amount());

        self.confirmation(Operation::WithdrawMoney, session, call).await
    }

    /// 转账；默认在显式事务中执行
    pub async fn transfer_money<S: DatabaseSession>(
        &self,
        session: S,
        transfer: &TransferRequest,
    ) -> AppResult<Confirmation> {
        let identity = &transfer.sender_identity;
        let call = FunctionCall::scalar(Operation::TransferMoney.function_name())
            .arg(transfer.sender.0)
            .arg(transfer.destination.0)
            .arg(transfer.amount.amount())
            .arg(identity.birthdate)
            .arg(identity.social_number.0)
            .arg(identity.mother_full_name.as_str());

        self.confirmation(Operation::TransferMoney, session, call).await
    }

    async fn confirmation<S: DatabaseSession>(
        &self,
        operation: Operation,
        session: S,
        call: FunctionCall,
    ) -> AppResult<Confirmation> {
        let row = self.invoke(operation, session, call).await?;
        scalar::<String>(operation, &row).map(Confirmation)
    }

    /// 通用路径：执行调用、记录指标，零行视为 `NoResult`
    async fn invoke<S: DatabaseSession>(
        &self,
        operation: Operation,
        session: S,
        call: FunctionCall,
    ) -> AppResult<ResultRow> {
        let transaction = self.options.transaction_for(operation);
        let started = Instant::now();

        let outcome = execute(
            session,
            operation.function_name(),
            &call,
            transaction.as_ref(),
        )
        .await
        .and_then(|row| {
            row.ok_or_else(|| {
                AppError::no_result(format!("{} returned no rows", operation.function_name()))
            })
        });

        record_call(operation, &outcome, started.elapsed());
        outcome
    }
}

/// 读取标量结果；NULL 等同于没有结果
fn scalar<T: FromSqlValue>(operation: Operation, row: &ResultRow) -> AppResult<T> {
    let value = row.scalar()?;
    if value.is_null() {
        return Err(AppError::no_result(format!(
            "{} returned NULL",
            operation.function_name()
        )));
    }
    T::from_sql_value(value)
}

fn account_info_call(identity: &AccountIdentity) -> FunctionCall {
    FunctionCall::table(Operation::GetAccountInfo.function_name())
        .arg(identity.social_number.0)
        .arg(identity.birthdate)
        .arg(identity.mother_full_name.as_str())
}

fn labeled_text(row: &ResultRow) -> AppResult<BTreeMap<String, String>> {
    columns::LABELED
        .iter()
        .map(|(label, column)| {
            let value = row.get_named(column)?;
            Ok::<_, AppError>((label.to_string(), value.to_string()))
        })
        .collect()
}

fn profile_from_row(row: &ResultRow) -> AppResult<AccountProfile> {
    Ok(AccountProfile {
        account_number: AccountNumber(row.try_get_named::<i32>(columns::ACCOUNT_NUMBER)?),
        social_number: SocialNumber(row.try_get_named::<i32>(columns::SOCIAL_NUMBER)?),
        first_name: row.try_get_named(columns::FIRST_NAME)?,
        last_name: row.try_get_named(columns::LAST_NAME)?,
        birthdate: row.try_get_named::<NaiveDate>(columns::BIRTHDATE)?,
        mother_full_name: row.try_get_named(columns::MOTHER_FULL_NAME)?,
        address: row.try_get_named(columns::ADDRESS)?,
        balance: Money::new(row.try_get_named::<Decimal>(columns::ACCOUNT_BALANCE)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use simplebank_errors::ErrorKind;
    use simplebank_ports::SqlValue;

    #[test]
    fn test_scalar_null_is_no_result() {
        let row = ResultRow::new().with("close_account", SqlValue::Null);
        let err = scalar::<String>(Operation::CloseAccount, &row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoResult);
    }

    #[test]
    fn test_scalar_wrong_type_is_decode_error() {
        let row = ResultRow::new().with("create_account", SqlValue::Text("abc".into()));
        let err = scalar::<i32>(Operation::CreateAccount, &row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_labeled_text_keeps_null_columns() {
        let row = ResultRow::new()
            .with(columns::ACCOUNT_NUMBER, SqlValue::Int(1001))
            .with(columns::SOCIAL_NUMBER, SqlValue::Int(123456789))
            .with(columns::FIRST_NAME, SqlValue::Text("Ana".into()))
            .with(columns::LAST_NAME, SqlValue::Text("Souza".into()))
            .with(columns::BIRTHDATE, SqlValue::Text("1990-05-17".into()))
            .with(columns::MOTHER_FULL_NAME, SqlValue::Text("Maria Souza".into()))
            .with(columns::ADDRESS, SqlValue::Null)
            .with(columns::ACCOUNT_BALANCE, SqlValue::Decimal(dec!(0.00)));

        let fields = labeled_text(&row).unwrap();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[labels::ADDRESS], "");
        assert_eq!(fields[labels::ACCOUNT_BALANCE], "0.00");
    }

    #[test]
    fn test_labeled_columns_cover_every_label() {
        let labeled: Vec<&str> = columns::LABELED.iter().map(|(label, _)| *label).collect();
        assert_eq!(labeled, labels::ALL.to_vec());
    }

    #[test]
    fn test_profile_missing_column() {
        let row = ResultRow::new()
            .with(columns::ACCOUNT_NUMBER, SqlValue::Int(1))
            .with(columns::ACCOUNT_BALANCE, SqlValue::Decimal(dec!(1.00)));
        let err = profile_from_row(&row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
