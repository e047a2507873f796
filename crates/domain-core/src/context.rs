//! 实体访问上下文

use std::sync::Arc;

use strata_errors::AppResult;
use strata_ports::{AuditLog, DataContext, RecordStore};

use crate::entity::Entity;
use crate::factory::EntityFactory;
use crate::operate::EntityOperate;

/// 实体工厂与数据访问上下文的组合
///
/// 实体的保存、删除与查找都从这里取操作接口，使调用方注入的工厂
/// （以及通过 [`EntityFactory::register_operate`] 登记的接口）生效。
#[derive(Clone)]
pub struct EntityContext {
    factory: Arc<EntityFactory>,
    data: DataContext,
}

impl EntityContext {
    pub fn new(factory: Arc<EntityFactory>, data: DataContext) -> Self {
        Self { factory, data }
    }

    /// 使用进程级默认工厂
    pub fn with_global(data: DataContext) -> Self {
        Self::new(EntityFactory::shared(), data)
    }

    pub fn factory(&self) -> &EntityFactory {
        &self.factory
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.data.store()
    }

    pub fn audit(&self) -> &dyn AuditLog {
        self.data.audit()
    }

    /// 实体类型 `T` 的操作接口
    pub fn operate_of<T: Entity>(&self) -> AppResult<Arc<dyn EntityOperate>> {
        Ok(self.factory.operate_of::<T>()?)
    }
}
