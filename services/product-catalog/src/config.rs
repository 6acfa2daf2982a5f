//! 服务配置

use std::path::PathBuf;

use boutique_config::ServiceDefaults;
use serde::Deserialize;

/// 内置默认值
pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    app_name: "productcatalogservice",
    port: 3550,
};

/// `[catalog]` 配置段
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// 目录 JSON 文件路径
    pub path: PathBuf,
    /// 启动时是否开启读时重载
    pub reload_on_read: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("products.json"),
            reload_on_read: false,
        }
    }
}
