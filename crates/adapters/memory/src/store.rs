//! 内存记录存储

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use strata_errors::{AppError, AppResult};
use strata_ports::{RecordStore, Row};
use tracing::debug;

/// 主键字段名
pub const ID_FIELD: &str = "id";

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

/// 内存记录存储
///
/// 每张表独立分配递增主键，读写分别持有读锁与写锁。
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<HashMap<String, Table>>,
    writes: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写操作（插入、更新、删除）次数
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// 表内记录数
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .get(table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

fn with_id(mut row: Row, id: i64) -> AppResult<Row> {
    match row.as_object_mut() {
        Some(object) => {
            object.insert(ID_FIELD.to_string(), Value::from(id));
            Ok(row)
        }
        None => Err(AppError::validation("record must be a JSON object")),
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, table: &str, row: Row) -> AppResult<i64> {
        let mut tables = self.tables.write();
        let entry = tables.entry(table.to_string()).or_default();
        entry.next_id += 1;
        let id = entry.next_id;
        entry.rows.insert(id, with_id(row, id)?);
        self.writes.fetch_add(1, Ordering::SeqCst);

        debug!(table, id, "Row inserted");
        Ok(id)
    }

    async fn update(&self, table: &str, id: i64, row: Row) -> AppResult<u64> {
        let row = with_id(row, id)?;
        let mut tables = self.tables.write();
        self.writes.fetch_add(1, Ordering::SeqCst);
        match tables.get_mut(table).and_then(|t| t.rows.get_mut(&id)) {
            Some(existing) => {
                *existing = row;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, table: &str, id: i64) -> AppResult<u64> {
        let mut tables = self.tables.write();
        self.writes.fetch_add(1, Ordering::SeqCst);
        let removed = tables
            .get_mut(table)
            .and_then(|t| t.rows.remove(&id))
            .is_some();
        Ok(u64::from(removed))
    }

    async fn find_by_key(&self, table: &str, id: i64) -> AppResult<Option<Row>> {
        Ok(self
            .tables
            .read()
            .get(table)
            .and_then(|t| t.rows.get(&id))
            .cloned())
    }

    async fn find_all(&self, table: &str) -> AppResult<Vec<Row>> {
        Ok(self
            .tables
            .read()
            .get(table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }
}
