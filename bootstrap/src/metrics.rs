//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use boutique_telemetry::init_metrics;
use metrics_exporter_prometheus::{BuildError, PrometheusHandle};

/// Metrics 记录器
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus 记录器（每个进程只能调用一次）
    pub fn install() -> Result<Self, BuildError> {
        Ok(Self {
            handle: init_metrics()?,
        })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
