//! 实体工厂
//!
//! 注册表、名称解析与操作接口缓存的统一入口。

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::cache::OperateCache;
use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::entity::{Entity, EntityObject};
use crate::error::RegistryError;
use crate::operate::EntityOperate;
use crate::registry::EntityTypeRegistry;
use crate::resolver::NameResolver;
use crate::scanner::TypeCandidateScanner;

static GLOBAL: Lazy<Arc<EntityFactory>> =
    Lazy::new(|| Arc::new(EntityFactory::new(TypeCandidateScanner::with_defaults())));

/// 实体工厂
pub struct EntityFactory {
    registry: Arc<EntityTypeRegistry>,
    resolver: NameResolver,
    cache: OperateCache,
}

impl EntityFactory {
    pub fn new(scanner: TypeCandidateScanner) -> Self {
        let registry = Arc::new(EntityTypeRegistry::new(scanner));
        Self {
            resolver: NameResolver::new(registry.clone()),
            registry,
            cache: OperateCache::new(),
        }
    }

    /// 进程级默认实例，使用 `inventory` 登记与默认黑名单
    pub fn global() -> &'static EntityFactory {
        &GLOBAL
    }

    /// 进程级默认实例的共享引用，用于注入 [`EntityContext`](crate::EntityContext)
    pub fn shared() -> Arc<EntityFactory> {
        Arc::clone(&GLOBAL)
    }

    pub fn registry(&self) -> &EntityTypeRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &OperateCache {
        &self.cache
    }

    /// 所有实体类型
    pub fn all_entities(&self) -> &[TypeDescriptor] {
        self.registry.all()
    }

    /// 按名称解析实体类型
    pub fn resolve(&self, name: &str) -> Option<&TypeDescriptor> {
        self.resolver.resolve(name)
    }

    /// 按名称创建实例，名称无法解析时返回 `None`
    pub fn create(&self, name: &str) -> Option<Box<dyn EntityObject>> {
        self.resolve(name).and_then(|descriptor| self.create_type(descriptor))
    }

    /// 创建指定类型的实例
    pub fn create_type(&self, descriptor: &TypeDescriptor) -> Option<Box<dyn EntityObject>> {
        descriptor.instantiate()
    }

    /// 按名称获取操作接口
    ///
    /// 名称无法解析时返回 `Ok(None)`；类型无法构造操作接口时返回错误。
    pub fn create_operate(
        &self,
        name: &str,
    ) -> Result<Option<Arc<dyn EntityOperate>>, RegistryError> {
        match self.resolve(name) {
            Some(descriptor) => self.operate_for(descriptor).map(Some),
            None => {
                debug!(name, "Cannot find entity type while creating operate interface");
                Ok(None)
            }
        }
    }

    /// 按名称获取操作接口，名称无法解析视为错误
    pub fn require_operate(&self, name: &str) -> Result<Arc<dyn EntityOperate>, RegistryError> {
        self.create_operate(name)?
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
            })
    }

    /// 获取指定类型的操作接口
    pub fn operate_for(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Result<Arc<dyn EntityOperate>, RegistryError> {
        self.cache.get_or_create(descriptor)
    }

    /// 获取实体类型 `T` 的操作接口，不要求 `T` 已登记
    pub fn operate_of<T: Entity>(&self) -> Result<Arc<dyn EntityOperate>, RegistryError> {
        self.cache.get_or_create(&TypeDescriptor::of::<T>())
    }

    /// 使用已有的操作接口登记，避免重新构造
    pub fn register_operate(
        &self,
        key: TypeKey,
        handle: Arc<dyn EntityOperate>,
    ) -> Arc<dyn EntityOperate> {
        self.cache.register(key, handle)
    }
}
