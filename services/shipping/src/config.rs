//! 服务配置

use boutique_config::ServiceDefaults;

/// 内置默认值
pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    app_name: "shippingservice",
    port: 50051,
};
