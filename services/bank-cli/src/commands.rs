//! 子命令执行

use std::time::Duration;

use anyhow::{Context, Result, bail};
use simplebank_adapter_postgres::{PgConnector, check_connection};
use simplebank_domain::{
    AccountIdentity, AccountNumber, AccountProfile, Money, NewAccount, ProfileUpdate,
    TransferRequest, labels,
};
use simplebank_gateway::{BankGateway, ERROR_KEY, SentinelGateway};
use simplebank_ports::{ConnectionSupplier, DatabaseSession};

use crate::AccountCommand;

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// 通过类型化网关执行命令；拒绝与故障都作为错误返回
pub async fn run(
    gateway: &BankGateway,
    connector: &PgConnector,
    command: AccountCommand,
) -> Result<String> {
    let session = connector.acquire().await?;

    let output = match command {
        AccountCommand::Create {
            identity,
            first_name,
            last_name,
            address,
            balance,
        } => {
            let account = NewAccount {
                identity: identity.into(),
                first_name,
                last_name,
                address,
                opening_balance: Money::new(balance),
            };
            let number = gateway
                .create_account(session, &account)
                .await
                .context("Failed to create account")?;
            format!("ACCOUNT NUMBER: {}", number)
        }
        AccountCommand::Close { account, identity } => gateway
            .close_account(session, AccountNumber(account), &identity.into())
            .await
            .context("Failed to close account")?
            .into_inner(),
        AccountCommand::Info { identity } => {
            let profile = gateway
                .get_account_info(session, &identity.into())
                .await
                .context("Failed to fetch account info")?;
            render_profile(&profile)
        }
        AccountCommand::Update {
            account,
            identity,
            first_name,
            last_name,
            address,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                address,
            };
            gateway
                .update_account_info(session, AccountNumber(account), &identity.into(), &update)
                .await
                .context("Failed to update account info")?
                .into_inner()
        }
        AccountCommand::Deposit { account, amount } => gateway
            .deposit_money(session, AccountNumber(account), Money::new(amount))
            .await
            .context("Failed to deposit money")?
            .to_string(),
        AccountCommand::Withdraw { account, amount } => gateway
            .withdraw_money(session, AccountNumber(account), Money::new(amount))
            .await
            .context("Failed to withdraw money")?
            .into_inner(),
        AccountCommand::Transfer {
            sender,
            destination,
            amount,
            identity,
        } => {
            let transfer = transfer_request(sender, destination, amount, identity.into());
            gateway
                .transfer_money(session, &transfer)
                .await
                .context("Failed to transfer money")?
                .into_inner()
        }
    };

    Ok(output)
}

/// 通过哨兵网关执行命令；只有获取连接失败才会报错
pub async fn run_legacy(
    gateway: &SentinelGateway,
    connector: &PgConnector,
    command: AccountCommand,
) -> Result<String> {
    let session = connector.acquire().await?;

    let output = match command {
        AccountCommand::Create {
            identity,
            first_name,
            last_name,
            address,
            balance,
        } => {
            let account = NewAccount {
                identity: identity.into(),
                first_name,
                last_name,
                address,
                opening_balance: Money::new(balance),
            };
            gateway.create_account(session, &account).await.to_string()
        }
        AccountCommand::Close { account, identity } => {
            gateway
                .close_account(session, AccountNumber(account), &identity.into())
                .await
        }
        AccountCommand::Info { identity } => {
            let info = gateway.get_account_info(session, &identity.into()).await;
            match info.get(ERROR_KEY) {
                Some(message) => message.clone(),
                None => render_labeled(|label| info.get(label)),
            }
        }
        AccountCommand::Update {
            account,
            identity,
            first_name,
            last_name,
            address,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                address,
            };
            gateway
                .update_account_info(session, AccountNumber(account), &identity.into(), &update)
                .await
        }
        AccountCommand::Deposit { account, amount } => {
            gateway
                .deposit_money(session, AccountNumber(account), Money::new(amount))
                .await
        }
        AccountCommand::Withdraw { account, amount } => {
            gateway
                .withdraw_money(session, AccountNumber(account), Money::new(amount))
                .await
        }
        AccountCommand::Transfer {
            sender,
            destination,
            amount,
            identity,
        } => {
            let transfer = transfer_request(sender, destination, amount, identity.into());
            gateway.transfer_money(session, &transfer).await
        }
    };

    Ok(output)
}

/// 打开一个连接并执行健康检查
pub async fn ping(connector: &PgConnector) -> Result<String> {
    let mut session = connector.acquire().await?;
    let result = check_connection(&mut session, PING_TIMEOUT).await;
    session.close().await?;

    if !result.healthy {
        bail!(
            "Database is unreachable: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    Ok(format!(
        "OK ({} ms) {}",
        result.latency_ms.unwrap_or_default(),
        result.db_version.unwrap_or_default()
    ))
}

fn transfer_request(
    sender: i32,
    destination: i32,
    amount: rust_decimal::Decimal,
    sender_identity: AccountIdentity,
) -> TransferRequest {
    TransferRequest {
        sender: AccountNumber(sender),
        destination: AccountNumber(destination),
        amount: Money::new(amount),
        sender_identity,
    }
}

/// 按固定标签顺序逐行输出账户资料
fn render_profile(profile: &AccountProfile) -> String {
    let fields = profile.labeled_fields();
    render_labeled(|label| fields.get(label))
}

fn render_labeled<'a>(lookup: impl Fn(&str) -> Option<&'a String>) -> String {
    labels::ALL
        .iter()
        .filter_map(|label| lookup(*label).map(|value| format!("{}: {}", label, value)))
        .collect::<Vec<_>>()
        .join("\n")
}
