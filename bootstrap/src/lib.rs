//! strata-bootstrap - 统一启动骨架
//!
//! 按配置初始化日志、审计与实体工厂

mod runtime;

pub use runtime::*;
