//! 操作目录

use std::fmt;

/// 网关支持的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAccount,
    CloseAccount,
    GetAccountInfo,
    UpdateAccountInfo,
    DepositMoney,
    WithdrawMoney,
    TransferMoney,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::CreateAccount,
        Operation::CloseAccount,
        Operation::GetAccountInfo,
        Operation::UpdateAccountInfo,
        Operation::DepositMoney,
        Operation::WithdrawMoney,
        Operation::TransferMoney,
    ];

    /// 对应的存储函数名
    pub fn function_name(&self) -> &'static str {
        match self {
            Operation::CreateAccount => "create_account",
            Operation::CloseAccount => "close_account",
            Operation::GetAccountInfo => "get_account_info",
            Operation::UpdateAccountInfo => "update_user_data",
            Operation::DepositMoney => "deposit_money",
            Operation::WithdrawMoney => "withdraw_money",
            Operation::TransferMoney => "transfer_money",
        }
    }

    /// 是否修改数据
    pub fn is_write(&self) -> bool {
        !matches!(self, Operation::GetAccountInfo)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}
