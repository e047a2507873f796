//! 实体操作接口
//!
//! 操作接口只用来做实体操作，每个实体类型只需要一个实例。

use std::marker::PhantomData;

use async_trait::async_trait;
use strata_errors::{AppError, AppResult};
use strata_ports::{RecordStore, Row};
use tracing::debug;

use crate::descriptor::{TypeKey, short_name};
use crate::entity::{Entity, EntityObject};

/// 实体操作接口（类型擦除）
#[async_trait]
pub trait EntityOperate: Send + Sync {
    /// 所服务的实体类型
    fn entity_type(&self) -> TypeKey;

    /// 实体短名称
    fn entity_name(&self) -> &'static str;

    fn table(&self) -> &'static str;

    /// 创建一个默认实例
    fn create(&self) -> Box<dyn EntityObject>;

    /// 从记录还原实例
    fn from_row(&self, row: Row) -> AppResult<Box<dyn EntityObject>>;

    async fn find_by_key(
        &self,
        store: &dyn RecordStore,
        id: i64,
    ) -> AppResult<Option<Box<dyn EntityObject>>>;

    async fn find_all(&self, store: &dyn RecordStore) -> AppResult<Vec<Box<dyn EntityObject>>>;

    /// 保存实例，主键为 0 时插入并回填主键，返回受影响行数
    async fn save(&self, store: &dyn RecordStore, entity: &mut dyn EntityObject) -> AppResult<u64>;

    async fn delete(&self, store: &dyn RecordStore, entity: &dyn EntityObject) -> AppResult<u64>;
}

/// 泛型实体操作实现
pub struct EntityOperator<T: Entity> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityOperator<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// 根据主键加载
    pub async fn load(&self, store: &dyn RecordStore, id: i64) -> AppResult<Option<T>> {
        match store.find_by_key(T::TABLE, id).await? {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    /// 加载全部
    pub async fn load_all(&self, store: &dyn RecordStore) -> AppResult<Vec<T>> {
        store
            .find_all(T::TABLE)
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppError::from))
            .collect()
    }

    fn expect_type(&self, entity: &dyn EntityObject) -> AppResult<()> {
        if entity.type_key() == TypeKey::of::<T>() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "operate interface for {} cannot handle {}",
                std::any::type_name::<T>(),
                entity.type_key()
            )))
        }
    }
}

impl<T: Entity> Default for EntityOperator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> EntityOperate for EntityOperator<T> {
    fn entity_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn entity_name(&self) -> &'static str {
        short_name(std::any::type_name::<T>())
    }

    fn table(&self) -> &'static str {
        T::TABLE
    }

    fn create(&self) -> Box<dyn EntityObject> {
        Box::new(T::default())
    }

    fn from_row(&self, row: Row) -> AppResult<Box<dyn EntityObject>> {
        let entity: T = serde_json::from_value(row)?;
        Ok(Box::new(entity))
    }

    async fn find_by_key(
        &self,
        store: &dyn RecordStore,
        id: i64,
    ) -> AppResult<Option<Box<dyn EntityObject>>> {
        Ok(self
            .load(store, id)
            .await?
            .map(|entity| Box::new(entity) as Box<dyn EntityObject>))
    }

    async fn find_all(&self, store: &dyn RecordStore) -> AppResult<Vec<Box<dyn EntityObject>>> {
        Ok(self
            .load_all(store)
            .await?
            .into_iter()
            .map(|entity| Box::new(entity) as Box<dyn EntityObject>)
            .collect())
    }

    async fn save(&self, store: &dyn RecordStore, entity: &mut dyn EntityObject) -> AppResult<u64> {
        self.expect_type(entity)?;
        let row = entity.to_row()?;
        if entity.key() == 0 {
            let id = store.insert(T::TABLE, row).await?;
            entity.set_key(id);
            debug!(table = T::TABLE, id, "Entity inserted");
            Ok(1)
        } else {
            store.update(T::TABLE, entity.key(), row).await
        }
    }

    async fn delete(&self, store: &dyn RecordStore, entity: &dyn EntityObject) -> AppResult<u64> {
        self.expect_type(entity)?;
        if entity.key() == 0 {
            return Ok(0);
        }
        store.delete(T::TABLE, entity.key()).await
    }
}
