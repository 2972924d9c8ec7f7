#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use simplebank_domain::{
    AccountIdentity, AccountNumber, Money, NewAccount, ProfileUpdate, TransferRequest,
};
use simplebank_errors::{AppError, AppResult};
use simplebank_gateway::columns;
use simplebank_ports::{
    DatabaseSession, FunctionCall, IsolationLevel, ResultRow, SqlParam, SqlValue,
    TransactionOptions,
};

/// 会话上发生的事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Begin(IsolationLevel),
    Call { sql: String, params: Vec<SqlParam> },
    Commit,
    Rollback,
    Close,
}

/// 预设的调用结果
#[derive(Debug, Clone)]
pub enum Reply {
    Row(ResultRow),
    NoRows,
    Fail(String),
}

/// 记录所有交互的会话
pub struct MockSession {
    log: Arc<Mutex<Vec<Event>>>,
    reply: Reply,
    fail_begin: bool,
    fail_commit: bool,
    fail_close: bool,
}

#[derive(Clone)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|e| *e == wanted).count()
    }

    pub fn closes(&self) -> usize {
        self.count(&Event::Close)
    }

    /// 去掉参数细节后的事件序列
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e {
                Event::Begin(_) => "begin",
                Event::Call { .. } => "call",
                Event::Commit => "commit",
                Event::Rollback => "rollback",
                Event::Close => "close",
            })
            .collect()
    }

    pub fn last_call(&self) -> Option<(String, Vec<SqlParam>)> {
        self.events().into_iter().rev().find_map(|e| match e {
            Event::Call { sql, params } => Some((sql, params)),
            _ => None,
        })
    }
}

impl MockSession {
    pub fn new(reply: Reply) -> (Self, Recorder) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let session = Self {
            log: log.clone(),
            reply,
            fail_begin: false,
            fail_commit: false,
            fail_close: false,
        };
        (session, Recorder(log))
    }

    pub fn returning(row: ResultRow) -> (Self, Recorder) {
        Self::new(Reply::Row(row))
    }

    pub fn scalar(value: SqlValue) -> (Self, Recorder) {
        Self::returning(ResultRow::new().with("result", value))
    }

    pub fn no_rows() -> (Self, Recorder) {
        Self::new(Reply::NoRows)
    }

    pub fn failing(msg: &str) -> (Self, Recorder) {
        Self::new(Reply::Fail(msg.to_string()))
    }

    pub fn fail_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    pub fn fail_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    fn record(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

#[async_trait]
impl DatabaseSession for MockSession {
    async fn call_function(&mut self, call: &FunctionCall) -> AppResult<Option<ResultRow>> {
        let sql = call.to_sql()?;
        self.record(Event::Call {
            sql,
            params: call.params().to_vec(),
        });
        match &self.reply {
            Reply::Row(row) => Ok(Some(row.clone())),
            Reply::NoRows => Ok(None),
            Reply::Fail(msg) => Err(AppError::database(msg.clone())),
        }
    }

    async fn begin(&mut self, options: &TransactionOptions) -> AppResult<()> {
        if self.fail_begin {
            return Err(AppError::transaction("begin refused"));
        }
        self.record(Event::Begin(options.isolation_level));
        Ok(())
    }

    async fn commit(&mut self) -> AppResult<()> {
        self.record(Event::Commit);
        if self.fail_commit {
            return Err(AppError::transaction("could not serialize access"));
        }
        Ok(())
    }

    async fn rollback(&mut self) -> AppResult<()> {
        self.record(Event::Rollback);
        Ok(())
    }

    async fn close(self) -> AppResult<()> {
        self.record(Event::Close);
        if self.fail_close {
            return Err(AppError::database("connection already closed"));
        }
        Ok(())
    }
}

// ============ Fixtures ============

pub fn birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
}

pub fn identity() -> AccountIdentity {
    AccountIdentity::new(123456789, birthdate(), "Maria Souza")
}

pub fn new_account() -> NewAccount {
    NewAccount {
        identity: identity(),
        first_name: "Ana".to_string(),
        last_name: "Souza".to_string(),
        address: "Rua A, 10".to_string(),
        opening_balance: Money::new(dec!(100.00)),
    }
}

pub fn profile_update() -> ProfileUpdate {
    ProfileUpdate {
        first_name: "Ana Maria".to_string(),
        last_name: "Souza".to_string(),
        address: "Rua B, 20".to_string(),
    }
}

pub fn transfer() -> TransferRequest {
    TransferRequest {
        sender: AccountNumber(1001),
        destination: AccountNumber(2002),
        amount: Money::new(dec!(25.50)),
        sender_identity: identity(),
    }
}

pub fn profile_row() -> ResultRow {
    profile_columns()
        .into_iter()
        .fold(ResultRow::new(), |row, (name, value)| row.with(name, value))
}

/// 把某一列替换为给定值的资料行
pub fn profile_row_with(column: &str, replacement: SqlValue) -> ResultRow {
    profile_columns()
        .into_iter()
        .map(|(name, value)| {
            if name == column {
                (name, replacement.clone())
            } else {
                (name, value)
            }
        })
        .fold(ResultRow::new(), |row, (name, value)| row.with(name, value))
}

fn profile_columns() -> Vec<(&'static str, SqlValue)> {
    vec![
        (columns::ACCOUNT_NUMBER, SqlValue::Int(1001)),
        (columns::SOCIAL_NUMBER, SqlValue::Int(123456789)),
        (columns::FIRST_NAME, SqlValue::Text("Ana".into())),
        (columns::LAST_NAME, SqlValue::Text("Souza".into())),
        (columns::BIRTHDATE, SqlValue::Date(birthdate())),
        (columns::MOTHER_FULL_NAME, SqlValue::Text("Maria Souza".into())),
        (columns::ADDRESS, SqlValue::Text("Rua A, 10".into())),
        (columns::ACCOUNT_BALANCE, SqlValue::Decimal(dec!(150.00))),
    ]
}
