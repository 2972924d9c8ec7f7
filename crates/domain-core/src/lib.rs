//! domain-core - 银行网关的值对象
//!
//! 这些类型只是请求/响应的形状，持久化由数据库负责。

mod account;
mod money;
mod receipt;

pub use account::*;
pub use money::*;
pub use receipt::*;
