//! boutique-config - 配置加载库
//!
//! 加载顺序（后者覆盖前者）：
//! 1. 服务内置默认值
//! 2. `<config_dir>/default.toml`、`<config_dir>/<APP_ENV>.toml`
//! 3. `BOUTIQUE_` 前缀环境变量，`__` 分隔层级（如 `BOUTIQUE_SERVER__PORT`）
//! 4. 兼容旧部署的环境变量：`PORT`、`EXTRA_LATENCY`、`PRODUCT_CATALOG_PATH`、`DISABLE_STATS`、
//!    `OTLP_SERVICE_ADDR` + `OTLP_SERVICE_PORT`（空值视为未设置）

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否启用 RPC 追踪与 Prometheus 指标
    #[serde(default = "default_stats_enabled")]
    pub stats_enabled: bool,
    /// metrics HTTP 端口，缺省为 gRPC 端口 + 1000
    pub metrics_port: Option<u16>,
    /// OTLP gRPC 收集器地址，如 "http://otel-collector:4317"；不设置则不导出
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stats_enabled() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            stats_enabled: default_stats_enabled(),
            metrics_port: None,
            otlp_endpoint: None,
        }
    }
}

/// 故障注入配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChaosConfig {
    /// 每个查询返回前的固定延迟，如 "250ms"、"1.5s"
    #[serde(default, with = "humantime_serde")]
    pub extra_latency: Duration,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub chaos: ChaosConfig,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// metrics HTTP 端口
    pub fn metrics_port(&self) -> u16 {
        self.telemetry
            .metrics_port
            .unwrap_or_else(|| self.server.port.saturating_add(1000))
    }
}

/// 服务内置默认值
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    pub app_name: &'static str,
    pub port: u16,
}

/// 配置加载器
///
/// 共享配置通过 [`ConfigLoader::app_config`] 读取，
/// 服务私有的配置段通过 [`ConfigLoader::section`] 读取。
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    pub fn new(config_dir: &str, defaults: ServiceDefaults) -> Self {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let figment = Figment::new()
            .merge(Serialized::default("app_name", defaults.app_name))
            .merge(Serialized::default("server.port", defaults.port))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("BOUTIQUE_").split("__"))
            .merge(legacy_env());

        Self { figment }
    }

    /// 读取共享应用配置
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config: AppConfig = self.figment.extract()?;

        if stats_disabled_by_env() {
            config.telemetry.stats_enabled = false;
        }

        if let Some(endpoint) = otlp_endpoint_from_env() {
            config.telemetry.otlp_endpoint = Some(endpoint);
        }

        Ok(config)
    }

    /// 读取服务私有配置段，配置段不存在时使用默认值
    pub fn section<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        if !self.figment.contains(key) {
            return Ok(T::default());
        }
        Ok(self.figment.extract_inner(key)?)
    }
}

/// 旧部署使用的裸环境变量，空值视为未设置
fn legacy_env() -> Env {
    Env::raw()
        .only(&["PORT", "EXTRA_LATENCY", "PRODUCT_CATALOG_PATH"])
        .filter(|key| non_empty_env(key.as_str()).is_some())
        .map(|key| {
            if key == "port" {
                "server.port".into()
            } else if key == "extra_latency" {
                "chaos.extra_latency".into()
            } else {
                "catalog.path".into()
            }
        })
}

/// `DISABLE_STATS` 为非空值时关闭统计
fn stats_disabled_by_env() -> bool {
    non_empty_env("DISABLE_STATS").is_some()
}

/// `OTLP_SERVICE_ADDR` 与 `OTLP_SERVICE_PORT` 同时非空时开启 OTLP 导出
fn otlp_endpoint_from_env() -> Option<String> {
    let addr = non_empty_env("OTLP_SERVICE_ADDR")?;
    let port = non_empty_env("OTLP_SERVICE_PORT")?;
    Some(format!("http://{}:{}", addr, port))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
