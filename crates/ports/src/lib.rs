//! ports - 抽象 trait 层
//!
//! 定义持久化与审计日志两类外部能力的抽象接口

mod audit;
mod context;
mod repository;

pub use audit::*;
pub use context::*;
pub use repository::*;
