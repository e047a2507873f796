//! 记录存储 trait 定义

use async_trait::async_trait;
use serde_json::Value;
use strata_errors::AppResult;

/// 一条持久化记录，JSON 对象形式
pub type Row = Value;

/// 记录存储（外部持久化能力）
///
/// 主键为数值型，`0` 表示尚未持久化。插入时由存储分配主键，并以 `id`
/// 字段写回记录。
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 插入记录，返回分配的主键
    async fn insert(&self, table: &str, row: Row) -> AppResult<i64>;

    /// 更新记录，返回受影响行数
    async fn update(&self, table: &str, id: i64, row: Row) -> AppResult<u64>;

    /// 删除记录，返回受影响行数
    async fn delete(&self, table: &str, id: i64) -> AppResult<u64>;

    /// 根据主键查找
    async fn find_by_key(&self, table: &str, id: i64) -> AppResult<Option<Row>>;

    /// 列出表内全部记录，按主键升序
    async fn find_all(&self, table: &str) -> AppResult<Vec<Row>>;
}
