//! 运行时

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use strata_adapter_memory::MemoryRecordStore;
use strata_config::StrataConfig;
use strata_domain_core::{EntityContext, EntityFactory, InventorySource, TypeCandidateScanner};
use strata_errors::{AppError, AppResult};
use strata_ports::DataContext;
use strata_telemetry::{TracingAuditLog, init_metrics, init_tracing, init_tracing_json};
use tracing::info;

/// 运行时启动参数
pub struct RuntimeConfig {
    pub config_dir: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            config_dir: "config".to_string(),
        }
    }
}

/// 初始化完成的运行时
///
/// 工厂的扫描黑名单来自配置；实体上下文持有同一个工厂，数据访问使用内存存储
/// 和基于 tracing 的审计日志。
pub struct Runtime {
    config: StrataConfig,
    context: EntityContext,
    audit: Arc<TracingAuditLog>,
    metrics: Option<PrometheusHandle>,
}

impl Runtime {
    pub fn config(&self) -> &StrataConfig {
        &self.config
    }

    pub fn factory(&self) -> &EntityFactory {
        self.context.factory()
    }

    pub fn context(&self) -> &EntityContext {
        &self.context
    }

    /// 运行期切换调试开关，关闭后审计日志不再输出
    pub fn set_debug(&self, debug: bool) {
        self.audit.set_debug(debug);
    }

    /// 安装 Prometheus 导出器，进程内只能成功一次
    pub fn install_metrics(&mut self) -> AppResult<()> {
        if self.metrics.is_some() {
            return Ok(());
        }
        let handle = init_metrics().map_err(|e| AppError::configuration(e.to_string()))?;
        self.metrics = Some(handle);
        Ok(())
    }

    /// Prometheus 文本格式的指标，未安装导出器时为 `None`
    pub fn render_metrics(&self) -> Option<String> {
        self.metrics.as_ref().map(|handle| handle.render())
    }
}

/// 按配置初始化运行时
pub fn init_runtime(config: &StrataConfig) -> Runtime {
    if config.json_logs() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    let scanner = TypeCandidateScanner::new(
        InventorySource,
        config.registry.excluded_module_prefixes.clone(),
    );
    let audit = Arc::new(TracingAuditLog::new(config.debug));
    let data = DataContext::new(Arc::new(MemoryRecordStore::new()), audit.clone());
    let context = EntityContext::new(Arc::new(EntityFactory::new(scanner)), data);

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        debug = config.debug,
        "Runtime initialized"
    );

    Runtime {
        config: config.clone(),
        context,
        audit,
        metrics: None,
    }
}

/// 加载配置目录并初始化运行时
pub fn start(runtime_config: &RuntimeConfig) -> AppResult<Runtime> {
    let config = StrataConfig::load(&runtime_config.config_dir)
        .map_err(|e| AppError::configuration(e.to_string()))?;

    Ok(init_runtime(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_config_default() {
        assert_eq!(RuntimeConfig::default().config_dir, "config");
    }

    #[test]
    fn test_init_runtime_defaults() {
        let runtime = init_runtime(&StrataConfig::default());
        assert_eq!(runtime.config().app_name, "strata");
        assert!(runtime.render_metrics().is_none());
        assert!(!runtime.context().audit().is_enabled());

        runtime.set_debug(true);
        assert!(runtime.context().audit().is_enabled());
    }

    #[test]
    fn test_start_with_missing_dir_uses_defaults() {
        let runtime = start(&RuntimeConfig {
            config_dir: "/nonexistent/strata".to_string(),
        })
        .unwrap();
        assert!(!runtime.config().debug);
    }
}
