//! 基于 tracing 的审计日志

use std::sync::atomic::{AtomicBool, Ordering};

use strata_ports::AuditLog;
use tracing::info;

use crate::AUDIT_TARGET;

/// 将审计日志写入 tracing
///
/// 调试开关可在运行期切换，关闭时 `write_log` 为空操作。
#[derive(Debug, Default)]
pub struct TracingAuditLog {
    debug: AtomicBool,
}

impl TracingAuditLog {
    pub fn new(debug: bool) -> Self {
        Self {
            debug: AtomicBool::new(debug),
        }
    }

    /// 切换调试开关
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }
}

impl AuditLog for TracingAuditLog {
    fn write_log(&self, category: &str, message: &str) {
        if !self.is_enabled() {
            return;
        }

        metrics::counter!("strata_audit_entries_total", "category" => category.to_string())
            .increment(1);
        info!(target: AUDIT_TARGET, category = %category, "{}", message);
    }

    fn is_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }
}
