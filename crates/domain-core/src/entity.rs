//! 实体基础 trait

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use strata_errors::AppResult;
use strata_ports::Row;

use crate::descriptor::TypeKey;
use crate::operate::{EntityOperate, EntityOperator};

/// 实体 trait
///
/// 合格的实体类型将 `Base` 设为 `Self`，表示其泛型实体基类的类型参数
/// 就是自身。派生出的"看起来像实体"的类型沿用父类的 `Base`，注册时会被
/// 过滤掉。
pub trait Entity:
    Serialize + DeserializeOwned + Default + fmt::Debug + Send + Sync + 'static
{
    /// 泛型实体基类的类型参数
    type Base: 'static;

    /// 存储表名
    const TABLE: &'static str;

    /// 自身与泛型实体基类之间的中间层，近者在前
    const LAYERS: &'static [&'static str] = &[];

    /// 主键，0 表示未持久化
    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// 是否尚未持久化
    fn is_new(&self) -> bool {
        self.id() == 0
    }
}

/// 类型擦除的实体实例
pub trait EntityObject: Any + fmt::Debug + Send + Sync {
    fn type_key(&self) -> TypeKey;

    fn key(&self) -> i64;

    fn set_key(&mut self, id: i64);

    fn to_row(&self) -> AppResult<Row>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// 该实例对应的操作接口，实例不具备操作能力时返回 `None`
    fn operate(&self) -> Option<Arc<dyn EntityOperate>>;
}

impl<T: Entity> EntityObject for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn key(&self) -> i64 {
        self.id()
    }

    fn set_key(&mut self, id: i64) {
        self.set_id(id);
    }

    fn to_row(&self) -> AppResult<Row> {
        Ok(serde_json::to_value(self)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn operate(&self) -> Option<Arc<dyn EntityOperate>> {
        Some(Arc::new(EntityOperator::<T>::new()))
    }
}

impl dyn EntityObject {
    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast<T: Entity>(self: Box<Self>) -> Option<T> {
        self.into_any().downcast::<T>().ok().map(|entity| *entity)
    }
}
