//! simplebank-adapter-postgres - PostgreSQL 适配器

mod config;
mod connection;
mod decode;
mod health;
mod session;

pub use config::*;
pub use connection::*;
pub use health::*;
pub use session::*;
