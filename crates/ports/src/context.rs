//! 数据访问上下文

use std::sync::Arc;

use crate::{AuditLog, RecordStore};

/// 持久化与审计日志能力的组合，注入给需要保存或删除记录的调用方
#[derive(Clone)]
pub struct DataContext {
    store: Arc<dyn RecordStore>,
    audit: Arc<dyn AuditLog>,
}

impl DataContext {
    pub fn new(store: Arc<dyn RecordStore>, audit: Arc<dyn AuditLog>) -> Self {
        Self { store, audit }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn audit(&self) -> &dyn AuditLog {
        self.audit.as_ref()
    }
}
