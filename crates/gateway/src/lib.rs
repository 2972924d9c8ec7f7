//! simplebank-gateway - 存储过程网关
//!
//! 七个操作共享同一条路径：接管连接 → （可选）开启事务 → 调用存储函数 →
//! 读取至多一行 → 提交或回滚 → 关闭连接 → 映射为类型化结果。
//!
//! 业务规则（余额检查、重复开户、转账原子性）全部由数据库中的存储过程负责。

mod gateway;
mod instrument;
mod operation;
mod options;
mod scope;
mod sentinel;

pub use gateway::*;
pub use operation::*;
pub use options::*;
pub use scope::*;
pub use sentinel::*;
