//! 网关选项

use simplebank_ports::{IsolationLevel, TransactionOptions, TransactionScope};

use crate::Operation;

/// 网关选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayOptions {
    /// 哪些操作使用显式事务
    pub transaction_scope: TransactionScope,
    /// 显式事务的隔离级别
    pub isolation_level: IsolationLevel,
}

impl GatewayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction_scope(mut self, scope: TransactionScope) -> Self {
        self.transaction_scope = scope;
        self
    }

    pub fn with_isolation_level(mut self, level: IsolationLevel) -> Self {
        self.isolation_level = level;
        self
    }

    /// 操作的事务策略；`None` 表示自动提交
    pub fn transaction_for(&self, operation: Operation) -> Option<TransactionOptions> {
        let explicit = match self.transaction_scope {
            TransactionScope::TransferOnly => operation == Operation::TransferMoney,
            TransactionScope::AllWrites => operation.is_write(),
        };

        explicit.then(|| TransactionOptions::new().with_isolation_level(self.isolation_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_only_by_default() {
        let options = GatewayOptions::default();
        for op in Operation::ALL {
            assert_eq!(
                options.transaction_for(op).is_some(),
                op == Operation::TransferMoney,
                "{}",
                op
            );
        }
    }

    #[test]
    fn test_all_writes() {
        let options = GatewayOptions::new()
            .with_transaction_scope(TransactionScope::AllWrites)
            .with_isolation_level(IsolationLevel::Serializable);

        assert!(options.transaction_for(Operation::GetAccountInfo).is_none());
        let tx = options.transaction_for(Operation::DepositMoney).unwrap();
        assert_eq!(tx.isolation_level, IsolationLevel::Serializable);
        assert_eq!(
            Operation::ALL
                .iter()
                .filter(|op| options.transaction_for(**op).is_some())
                .count(),
            6
        );
    }
}
