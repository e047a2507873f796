//! 类型名解析

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::descriptor::{NAMESPACE_SEPARATOR, TypeDescriptor};
use crate::registry::EntityTypeRegistry;

/// 将短名称或全限定名解析为实体类型
///
/// 先按全限定名直接查找，失败后线性扫描注册表：名称不含命名空间分隔符时
/// 匹配短名称，否则匹配全限定名。找不到时返回 `None`。
pub struct NameResolver {
    registry: Arc<EntityTypeRegistry>,
    by_full_name: OnceCell<HashMap<&'static str, usize>>,
}

impl NameResolver {
    pub fn new(registry: Arc<EntityTypeRegistry>) -> Self {
        Self {
            registry,
            by_full_name: OnceCell::new(),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&TypeDescriptor> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        self.resolve_direct(name).or_else(|| self.resolve_scan(name))
    }

    fn resolve_direct(&self, name: &str) -> Option<&TypeDescriptor> {
        let entities = self.registry.all();
        let index = self.by_full_name.get_or_init(|| {
            let mut index = HashMap::with_capacity(entities.len());
            for (pos, descriptor) in entities.iter().enumerate() {
                index.entry(descriptor.full_name).or_insert(pos);
            }
            index
        });

        index.get(name).map(|&pos| &entities[pos])
    }

    fn resolve_scan(&self, name: &str) -> Option<&TypeDescriptor> {
        let entities = self.registry.all();
        if name.contains(NAMESPACE_SEPARATOR) {
            let name = name.trim_start_matches(NAMESPACE_SEPARATOR);
            entities.iter().find(|descriptor| descriptor.full_name == name)
        } else {
            entities.iter().find(|descriptor| descriptor.name() == name)
        }
    }
}
