//! adapter-memory - 内存实现
//!
//! 用于本地开发与测试，进程退出后数据丢失。

mod audit;
mod store;

pub use audit::*;
pub use store::*;
