//! auth-core - 角色菜单权限
//!
//! 权限标志位与角色菜单关联实体

mod permission;
mod role_menu;

pub use permission::*;
pub use role_menu::*;
