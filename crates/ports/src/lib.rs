//! ports - 抽象 trait 层
//!
//! 定义网关与数据库之间的抽象接口：一次存储函数调用的描述、结果行、
//! 会话与连接提供者。

mod call;
mod row;
mod session;
mod transaction;

pub use call::*;
pub use row::*;
pub use session::*;
pub use transaction::*;
