//! 角色和菜单
//!
//! 一条角色与菜单（资源）的关联，附带一组操作权限。`(role_id, menu_id)`
//! 的唯一性由存储层保证，这里不做约束。

use serde::{Deserialize, Serialize};
use strata_domain_core::{Entity, EntityContext, EntityObject, register_entity};
use strata_errors::{AppError, AppResult};
use tracing::debug;

use crate::permission::PermissionFlags;

/// 审计日志类别：添加
pub const AUDIT_ADDED: &str = "added";
/// 审计日志类别：修改
pub const AUDIT_MODIFIED: &str = "modified";
/// 审计日志类别：删除
pub const AUDIT_REMOVED: &str = "removed";

/// 角色和菜单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMenu {
    /// 编号，0 表示未持久化
    pub id: i64,
    /// 角色编号
    pub role_id: i32,
    /// 菜单编号
    pub menu_id: i32,
    /// 操作权限，按整数存储
    pub permission: i32,
}

impl Entity for RoleMenu {
    type Base = RoleMenu;
    const TABLE: &'static str = "role_menu";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

register_entity!(RoleMenu);

fn downcast(entity: Box<dyn EntityObject>) -> AppResult<RoleMenu> {
    entity
        .downcast::<RoleMenu>()
        .ok_or_else(|| AppError::internal("operate interface returned a foreign entity type"))
}

impl RoleMenu {
    /// 根据角色编号和菜单编号创建，默认授予完全控制权限
    pub fn create(role_id: i32, menu_id: i32) -> Self {
        Self {
            id: 0,
            role_id,
            menu_id,
            permission: PermissionFlags::ALL.value(),
        }
    }

    /// 操作权限
    pub fn permission_flag(&self) -> PermissionFlags {
        PermissionFlags::from_value(self.permission)
    }

    /// 仅修改内存中的权限，不保存
    pub fn set_permission_flag(&mut self, flag: PermissionFlags) {
        self.permission = flag.value();
    }

    /// 设置权限，权限不相同时保存
    ///
    /// 权限未变化时返回 0 且不访问存储。
    pub async fn set_permission(&mut self, ctx: &EntityContext, flag: PermissionFlags) -> AppResult<u64> {
        if self.permission_flag() == flag {
            debug!(role = self.role_id, menu = self.menu_id, "Permission unchanged, skip saving");
            return Ok(0);
        }
        self.set_permission_flag(flag);

        self.save(ctx).await
    }

    /// 检查是否有指定权限
    pub fn acquire(&self, flag: PermissionFlags) -> bool {
        self.permission_flag().check(flag)
    }

    /// 添加权限，不保存
    pub fn add(&mut self, flag: PermissionFlags) -> &mut Self {
        self.set_permission_flag(self.permission_flag().grant(flag));
        self
    }

    /// 删除权限，不保存
    pub fn remove(&mut self, flag: PermissionFlags) -> &mut Self {
        self.set_permission_flag(self.permission_flag().revoke(flag));
        self
    }

    fn audit_message(&self) -> String {
        format!(
            "Role={},Menu={},Permission={}",
            self.role_id,
            self.menu_id,
            self.permission_flag()
        )
    }

    /// 保存，先写审计日志再交给存储
    ///
    /// 返回受影响行数；新记录保存后回填编号。
    pub async fn save(&mut self, ctx: &EntityContext) -> AppResult<u64> {
        let category = if self.is_new() { AUDIT_ADDED } else { AUDIT_MODIFIED };
        ctx.audit().write_log(category, &self.audit_message());

        ctx.operate_of::<Self>()?.save(ctx.store(), self).await
    }

    /// 删除，先写审计日志再交给存储
    pub async fn delete(&self, ctx: &EntityContext) -> AppResult<u64> {
        ctx.audit().write_log(AUDIT_REMOVED, &self.audit_message());

        ctx.operate_of::<Self>()?.delete(ctx.store(), self).await
    }

    /// 根据编号查找
    pub async fn find_by_key(ctx: &EntityContext, id: i64) -> AppResult<Option<Self>> {
        if id <= 0 {
            return Ok(None);
        }
        match ctx.operate_of::<Self>()?.find_by_key(ctx.store(), id).await? {
            Some(entity) => Ok(Some(downcast(entity)?)),
            None => Ok(None),
        }
    }

    /// 根据编号查找用于表单编辑，找不到时返回默认实例
    pub async fn find_by_key_for_edit(ctx: &EntityContext, id: i64) -> AppResult<Self> {
        Ok(Self::find_by_key(ctx, id).await?.unwrap_or_default())
    }

    /// 角色的所有菜单关联
    pub async fn find_all_by_role_id(ctx: &EntityContext, role_id: i32) -> AppResult<Vec<Self>> {
        if role_id <= 0 {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entity in ctx.operate_of::<Self>()?.find_all(ctx.store()).await? {
            let item = downcast(entity)?;
            if item.role_id == role_id {
                found.push(item);
            }
        }
        Ok(found)
    }

    /// 根据角色编号和菜单编号查找，先按角色缩小范围再找菜单
    pub async fn find_by_role_and_menu(
        ctx: &EntityContext,
        role_id: i32,
        menu_id: i32,
    ) -> AppResult<Option<Self>> {
        if role_id <= 0 || menu_id <= 0 {
            return Ok(None);
        }

        Ok(Self::find_all_by_role_id(ctx, role_id)
            .await?
            .into_iter()
            .find(|item| item.menu_id == menu_id))
    }
}
