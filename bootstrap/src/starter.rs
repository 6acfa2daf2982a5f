//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use boutique_config::{AppConfig, ConfigError, ConfigLoader, ServiceDefaults};
use boutique_errors::AppResult;
use serde::de::DeserializeOwned;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tower::layer::util::{Identity, Stack};
use tracing::{error, info, warn};

use crate::health::{HealthService, MetricsServer};
use crate::layer::RpcTelemetryLayer;
use crate::metrics::MetricsRecorder;
use crate::runtime::{init_runtime, shutdown_signal};

/// 带追踪层的 gRPC 服务器构建器
pub type GrpcServer = Server<Stack<RpcTelemetryLayer, Identity>>;

/// 带追踪层的 gRPC 路由
pub type GrpcRouter = Router<Stack<RpcTelemetryLayer, Identity>>;

/// 服务构建上下文
pub struct ServiceContext {
    config: AppConfig,
    loader: ConfigLoader,
}

impl ServiceContext {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 读取服务私有配置段
    pub fn section<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        self.loader.section(key)
    }
}

/// 运行 gRPC 服务
///
/// 这是所有微服务的统一入口点。它负责：
/// 1. 加载配置
/// 2. 初始化运行时（日志）
/// 3. 按配置安装 Prometheus 记录器并启动 HTTP 旁路服务器
/// 4. 调用用户提供的闭包注册业务服务
/// 5. 注册 grpc.health.v1 并启动服务器，处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use boutique_bootstrap::run_server;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_server(DEFAULTS, "config", |ctx, mut server| async move {
///         Ok(server.add_service(MyServiceServer::new(MyService::new())))
///     })
///     .await
/// }
/// ```
pub async fn run_server<F, Fut>(
    defaults: ServiceDefaults,
    config_dir: &str,
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(ServiceContext, GrpcServer) -> Fut,
    Fut: Future<Output = AppResult<GrpcRouter>>,
{
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    // 1. 加载配置
    let loader = ConfigLoader::new(config_dir, defaults);
    let config = loader.app_config()?;

    // 2. 初始化运行时
    let _tracing = init_runtime(&config)?;

    info!("Starting {} service", config.app_name);

    // 3. 统计开关
    let stats_enabled = config.telemetry.stats_enabled;
    let metrics_handle = if stats_enabled {
        info!("Stats enabled.");
        let metrics = MetricsRecorder::install()?;
        let metrics_server = MetricsServer::new(&config.app_name, metrics, config.metrics_port());
        Some(tokio::spawn(async move {
            if let Err(e) = metrics_server.serve().await {
                error!("Metrics server error: {}", e);
            }
        }))
    } else {
        info!("Stats disabled.");
        None
    };

    if !config.chaos.extra_latency.is_zero() {
        warn!(
            extra_latency = ?config.chaos.extra_latency,
            "extra latency enabled"
        );
    }

    // 4. 构建服务地址
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 5. 构建 gRPC 服务
    let server = Server::builder().layer(RpcTelemetryLayer::new(stats_enabled));
    let ctx = ServiceContext { config, loader };
    let router = server_builder(ctx, server).await?;

    info!(%addr, "gRPC server starting");

    // 6. 启动服务器
    router
        .add_service(HealthService::server())
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    // 7. 清理
    if let Some(handle) = metrics_handle {
        handle.abort();
    }

    info!("Service stopped");

    Ok(())
}
