//! 操作接口缓存

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::error::RegistryError;
use crate::operate::EntityOperate;

/// 实体类型到操作接口的映射，每个类型只构造一次
#[derive(Default)]
pub struct OperateCache {
    handles: RwLock<HashMap<TypeKey, Arc<dyn EntityOperate>>>,
}

impl OperateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取操作接口，不存在时构造
    ///
    /// 读锁快速路径命中直接返回；否则在写锁内再次检查后构造，
    /// 保证同一类型的构造逻辑只执行一次。
    pub fn get_or_create(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Result<Arc<dyn EntityOperate>, RegistryError> {
        if let Some(handle) = self.get(&descriptor.key) {
            return Ok(handle);
        }

        let mut handles = self.handles.write();
        if let Some(handle) = handles.get(&descriptor.key) {
            return Ok(handle.clone());
        }

        let handle = build(descriptor)?;
        handles.insert(descriptor.key, handle.clone());

        metrics::counter!("strata_operate_handles_built_total").increment(1);
        debug!(entity = descriptor.full_name, "Operate interface created");
        Ok(handle)
    }

    /// 使用已有的操作接口登记，覆盖旧值
    pub fn register(&self, key: TypeKey, handle: Arc<dyn EntityOperate>) -> Arc<dyn EntityOperate> {
        self.handles.write().insert(key, handle.clone());
        handle
    }

    pub fn get(&self, key: &TypeKey) -> Option<Arc<dyn EntityOperate>> {
        self.handles.read().get(key).cloned()
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.handles.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }
}

fn build(descriptor: &TypeDescriptor) -> Result<Arc<dyn EntityOperate>, RegistryError> {
    descriptor
        .instantiate()
        .and_then(|instance| instance.operate())
        .ok_or_else(|| RegistryError::OperateConstruction {
            type_name: descriptor.full_name.to_string(),
        })
}
