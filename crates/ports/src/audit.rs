//! 审计日志 trait 定义

/// 审计日志接收端
///
/// 由进程级调试开关控制，关闭时 `write_log` 不产生任何输出。
pub trait AuditLog: Send + Sync {
    /// 写入一条审计日志
    fn write_log(&self, category: &str, message: &str);

    /// 是否启用
    fn is_enabled(&self) -> bool;
}

