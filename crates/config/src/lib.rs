//! strata-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 遥测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// JSON 格式输出，未设置时生产环境默认开启
    #[serde(default)]
    pub json: Option<bool>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: None,
        }
    }
}

/// 实体注册表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// 扫描时跳过的模块名前缀
    #[serde(default = "default_excluded_module_prefixes")]
    pub excluded_module_prefixes: Vec<String>,
}

fn default_excluded_module_prefixes() -> Vec<String> {
    ["std", "core", "alloc", "strata-domain-core"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            excluded_module_prefixes: default_excluded_module_prefixes(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    /// 进程级调试开关，关闭时审计日志为空操作
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

fn default_app_name() -> String {
    "strata".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_env: default_app_env(),
            debug: false,
            telemetry: TelemetryConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl StrataConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 顺序：默认值 < `default.toml` < `{APP_ENV}.toml` < `STRATA_` 前缀环境变量
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("STRATA_").split("__"));

        Self::from_figment(figment)
    }

    /// 从已组装好的 figment 提取配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// 是否使用 JSON 日志
    pub fn json_logs(&self) -> bool {
        self.telemetry.json.unwrap_or_else(|| self.is_production())
    }
}

#[cfg(test)]
mod tests;
