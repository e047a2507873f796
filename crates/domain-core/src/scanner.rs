//! 候选类型扫描
//!
//! 实体类型通过 [`register_entity!`](crate::register_entity) 在静态初始化阶段
//! 提交到 `inventory`，扫描器按模块（crate 名）枚举这些登记，跳过黑名单前缀
//! 的模块。单个模块列举失败时跳过，不影响整体扫描。

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::descriptor::TypeDescriptor;

/// 默认跳过的模块前缀
pub const DEFAULT_EXCLUDED_MODULE_PREFIXES: &[&str] = &["std", "core", "alloc", "strata-domain-core"];

/// 模块无法列举类型
#[derive(Debug, Error)]
#[error("failed to list types of module {module}: {reason}")]
pub struct ScanError {
    pub module: String,
    pub reason: String,
}

/// 已加载的代码模块
pub trait CodeModule: Send + Sync {
    fn name(&self) -> &str;

    fn types(&self) -> Result<Vec<TypeDescriptor>, ScanError>;
}

/// 模块枚举能力
pub trait ModuleSource: Send + Sync {
    fn modules(&self) -> Vec<Box<dyn CodeModule>>;
}

/// 一条实体登记
pub struct EntityRegistration {
    pub module: &'static str,
    pub describe: fn() -> TypeDescriptor,
}

impl EntityRegistration {
    pub const fn new(module: &'static str, describe: fn() -> TypeDescriptor) -> Self {
        Self { module, describe }
    }
}

inventory::collect!(EntityRegistration);

/// 登记实体类型
///
/// ```ignore
/// register_entity!(RoleMenu);
/// ```
#[macro_export]
macro_rules! register_entity {
    ($ty:ty) => {
        $crate::inventory::submit! {
            $crate::EntityRegistration::new(
                env!("CARGO_PKG_NAME"),
                $crate::TypeDescriptor::of::<$ty>,
            )
        }
    };
    ($ty:ty, module = $module:expr) => {
        $crate::inventory::submit! {
            $crate::EntityRegistration::new($module, $crate::TypeDescriptor::of::<$ty>)
        }
    };
}

/// 基于 `inventory` 登记的模块来源
#[derive(Debug, Default, Clone, Copy)]
pub struct InventorySource;

struct InventoryModule {
    name: &'static str,
    describers: Vec<fn() -> TypeDescriptor>,
}

impl CodeModule for InventoryModule {
    fn name(&self) -> &str {
        self.name
    }

    fn types(&self) -> Result<Vec<TypeDescriptor>, ScanError> {
        let mut types: Vec<TypeDescriptor> = self.describers.iter().map(|describe| describe()).collect();
        types.sort_by(|a, b| a.full_name.cmp(b.full_name));
        Ok(types)
    }
}

impl ModuleSource for InventorySource {
    fn modules(&self) -> Vec<Box<dyn CodeModule>> {
        let mut grouped: BTreeMap<&'static str, Vec<fn() -> TypeDescriptor>> = BTreeMap::new();
        for registration in inventory::iter::<EntityRegistration> {
            grouped
                .entry(registration.module)
                .or_default()
                .push(registration.describe);
        }

        grouped
            .into_iter()
            .map(|(name, describers)| {
                Box::new(InventoryModule { name, describers }) as Box<dyn CodeModule>
            })
            .collect()
    }
}

/// 候选类型扫描器
pub struct TypeCandidateScanner {
    source: Box<dyn ModuleSource>,
    excluded_prefixes: Vec<String>,
}

impl TypeCandidateScanner {
    pub fn new(source: impl ModuleSource + 'static, excluded_prefixes: Vec<String>) -> Self {
        Self {
            source: Box::new(source),
            excluded_prefixes,
        }
    }

    /// 使用 `inventory` 登记与默认黑名单
    pub fn with_defaults() -> Self {
        Self::new(
            InventorySource,
            DEFAULT_EXCLUDED_MODULE_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
        )
    }

    fn is_excluded(&self, module: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| module.starts_with(prefix.as_str()))
    }

    /// 扫描所有模块，返回候选类型（按首次出现去重）
    ///
    /// 空结果表示什么也没发现，不是错误。
    pub fn scan(&self) -> Vec<TypeDescriptor> {
        let modules: Vec<Box<dyn CodeModule>> = self
            .source
            .modules()
            .into_iter()
            .filter(|module| !self.is_excluded(module.name()))
            .collect();
        debug!(count = modules.len(), "Modules found");

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for module in &modules {
            debug!(module = module.name(), "Loading module");
            match module.types() {
                Ok(types) => {
                    candidates.extend(types.into_iter().filter(|ty| seen.insert(ty.key)));
                }
                Err(e) => {
                    debug!(module = module.name(), error = %e, "Module skipped");
                }
            }
        }

        metrics::counter!("strata_registry_scans_total").increment(1);
        candidates
    }
}
