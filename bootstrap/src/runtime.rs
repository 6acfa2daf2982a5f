//! 服务运行时

use boutique_config::AppConfig;
use boutique_telemetry::{
    ExporterBuildError, OtlpExport, TracingGuard, init_tracing, init_tracing_json,
};
use tracing::{info, warn};

/// 初始化服务运行时
///
/// 返回的 guard 需持有到进程退出，drop 时刷新未导出的 span。
pub fn init_runtime(config: &AppConfig) -> Result<TracingGuard, ExporterBuildError> {
    let otlp = config
        .telemetry
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| OtlpExport {
            service_name: &config.app_name,
            endpoint,
        });

    // 初始化 tracing
    let guard = if config.is_production() {
        init_tracing_json(&config.telemetry.log_level, otlp)?
    } else {
        init_tracing(&config.telemetry.log_level, otlp)?
    };

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );

    if guard.otlp_enabled() {
        info!(
            endpoint = config.telemetry.otlp_endpoint.as_deref().unwrap_or_default(),
            "OpenTelemetry initialization enabled."
        );
    } else {
        info!("OpenTelemetry initialization disabled.");
    }

    Ok(guard)
}

/// 等待关闭信号
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
