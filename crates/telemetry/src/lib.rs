//! telemetry - 可观测性库
//!
//! 日志初始化、可选的 OTLP 追踪导出与 Prometheus 指标记录

mod otel;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use opentelemetry_otlp::ExporterBuildError;
pub use otel::{OtlpExport, build_tracer_provider, set_parent_from_headers};

/// 持有 OTLP TracerProvider，drop 时刷新并关闭导出
#[derive(Debug, Default)]
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    pub fn otlp_enabled(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                warn!(error = %e, "Failed to shut down OTLP tracer provider");
            }
        }
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 初始化 tracing
pub fn init_tracing(
    log_level: &str,
    otlp: Option<OtlpExport<'_>>,
) -> Result<TracingGuard, ExporterBuildError> {
    let provider = otlp.map(build_tracer_provider).transpose()?;

    tracing_subscriber::registry()
        .with(provider.as_ref().map(otel::install))
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(TracingGuard { provider })
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(
    log_level: &str,
    otlp: Option<OtlpExport<'_>>,
) -> Result<TracingGuard, ExporterBuildError> {
    let provider = otlp.map(build_tracer_provider).transpose()?;

    tracing_subscriber::registry()
        .with(provider.as_ref().map(otel::install))
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
        .init();

    Ok(TracingGuard { provider })
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// 记录 gRPC 请求
pub fn record_grpc_request(service: &str, method: &str, status: &str, duration_ms: f64) {
    let labels = [
        ("service", service.to_string()),
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    counter!("grpc_requests_total", &labels).increment(1);
    histogram!("grpc_request_duration_ms", &labels).record(duration_ms);
}

/// 记录商品目录加载
pub fn record_catalog_load(success: bool, duration_ms: f64) {
    let labels = [("success", success.to_string())];

    counter!("catalog_loads_total", &labels).increment(1);
    histogram!("catalog_load_duration_ms", &labels).record(duration_ms);
}

/// 设置当前目录中的商品数量
pub fn set_catalog_size(size: usize) {
    gauge!("catalog_products").set(size as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_guard_has_no_exporter() {
        let guard = TracingGuard::default();
        assert!(!guard.otlp_enabled());
    }

    #[tokio::test]
    async fn test_guard_with_exporter_shuts_down_on_drop() {
        let provider = build_tracer_provider(OtlpExport {
            service_name: "productcatalogservice",
            endpoint: "http://127.0.0.1:4317",
        })
        .unwrap();

        let guard = TracingGuard {
            provider: Some(provider),
        };
        assert!(guard.otlp_enabled());
        drop(guard);
    }
}
