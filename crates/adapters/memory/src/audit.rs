//! 内存审计日志

use parking_lot::Mutex;
use strata_ports::AuditLog;

/// 一条审计日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub category: String,
    pub message: String,
}

/// 记录审计日志，便于断言
#[derive(Debug)]
pub struct MemoryAuditLog {
    enabled: bool,
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }

    /// 指定类别的日志
    pub fn entries_in(&self, category: &str) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.category == category)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for MemoryAuditLog {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AuditLog for MemoryAuditLog {
    fn write_log(&self, category: &str, message: &str) {
        if !self.enabled {
            return;
        }
        self.entries.lock().push(AuditEntry {
            category: category.to_string(),
            message: message.to_string(),
        });
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
