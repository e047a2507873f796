//! domain-core - 实体类型注册与操作接口
//!
//! 实体类型在静态初始化阶段通过 [`register_entity!`] 自注册，首次访问时
//! 统一扫描、校验并缓存；每个实体类型对应唯一一个操作接口实例。

mod cache;
mod context;
mod descriptor;
mod entity;
mod error;
mod factory;
mod operate;
mod qualifier;
mod registry;
mod resolver;
mod scanner;

pub use cache::*;
pub use context::*;
pub use descriptor::*;
pub use entity::*;
pub use error::*;
pub use factory::*;
pub use operate::*;
pub use qualifier::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;

#[doc(hidden)]
pub use inventory;
