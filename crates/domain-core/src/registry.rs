//! 实体类型注册表

use once_cell::sync::OnceCell;
use tracing::info;

use crate::descriptor::TypeDescriptor;
use crate::qualifier::is_entity;
use crate::scanner::TypeCandidateScanner;

/// 所有实体类型
///
/// 首次访问时扫描并过滤，之后在整个生命周期内复用同一结果。并发的首次
/// 访问者会等待同一次计算完成。
pub struct EntityTypeRegistry {
    scanner: TypeCandidateScanner,
    entities: OnceCell<Vec<TypeDescriptor>>,
}

impl EntityTypeRegistry {
    pub fn new(scanner: TypeCandidateScanner) -> Self {
        Self {
            scanner,
            entities: OnceCell::new(),
        }
    }

    /// 所有实体类型，按扫描顺序
    pub fn all(&self) -> &[TypeDescriptor] {
        self.entities.get_or_init(|| self.load())
    }

    /// 是否已经完成扫描
    pub fn is_loaded(&self) -> bool {
        self.entities.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    fn load(&self) -> Vec<TypeDescriptor> {
        let candidates = self.scanner.scan();
        let total = candidates.len();
        let entities: Vec<TypeDescriptor> = candidates.into_iter().filter(is_entity).collect();

        info!(candidates = total, entities = entities.len(), "Entity types loaded");
        entities
    }
}
