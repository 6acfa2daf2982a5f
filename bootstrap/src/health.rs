//! 健康检查模块
//!
//! - gRPC `grpc.health.v1.Health`：`Check` 恒为 SERVING，`Watch` 未实现
//! - HTTP 旁路服务器：`/health` 与 `/metrics`

use std::net::SocketAddr;
use std::pin::Pin;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use tokio_stream::Stream;
use boutique_errors::AppError;
use tonic::{Request, Response, Status};
use tracing::info;

use crate::metrics::MetricsRecorder;

/// 生成的 grpc.health.v1 代码
pub mod proto {
    tonic::include_proto!("grpc.health.v1");
}

use proto::health_check_response::ServingStatus;
use proto::health_server::{Health, HealthServer};
use proto::{HealthCheckRequest, HealthCheckResponse};

/// gRPC 健康检查服务
#[derive(Debug, Default, Clone, Copy)]
pub struct HealthService;

impl HealthService {
    /// 构建可注册到 tonic 的服务
    pub fn server() -> HealthServer<HealthService> {
        HealthServer::new(HealthService)
    }
}

#[tonic::async_trait]
impl Health for HealthService {
    async fn check(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        Ok(Response::new(HealthCheckResponse {
            status: ServingStatus::Serving as i32,
        }))
    }

    type WatchStream = Pin<Box<dyn Stream<Item = Result<HealthCheckResponse, Status>> + Send>>;

    async fn watch(
        &self,
        _request: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        Err(AppError::unimplemented("health check via Watch not implemented").into())
    }
}

// ============================================================================
// HTTP 旁路服务器
// ============================================================================

/// 存活状态
#[derive(Debug, Clone, Serialize)]
pub struct LivenessStatus {
    pub status: &'static str,
    pub service: String,
}

#[derive(Clone)]
struct MetricsServerState {
    service: String,
    metrics: MetricsRecorder,
}

/// HTTP 健康检查 / metrics 服务器
pub struct MetricsServer {
    state: MetricsServerState,
    port: u16,
}

impl MetricsServer {
    pub fn new(service: impl Into<String>, metrics: MetricsRecorder, port: u16) -> Self {
        Self {
            state: MetricsServerState {
                service: service.into(),
                metrics,
            },
            port,
        }
    }

    fn router(self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(self.state)
    }

    /// 启动 HTTP 服务器
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "Metrics HTTP server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}

/// Liveness 端点处理器
async fn health_handler(State(state): State<MetricsServerState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessStatus {
            status: "healthy",
            service: state.service,
        }),
    )
}

/// Metrics 端点处理器
async fn metrics_handler(State(state): State<MetricsServerState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_reports_serving() {
        let response = HealthService
            .check(Request::new(HealthCheckRequest {
                service: String::new(),
            }))
            .await
            .unwrap();
        assert_eq!(response.into_inner().status, ServingStatus::Serving as i32);
    }

    #[tokio::test]
    async fn test_watch_is_unimplemented() {
        let result = HealthService
            .watch(Request::new(HealthCheckRequest {
                service: String::new(),
            }))
            .await;
        match result {
            Err(status) => assert_eq!(status.code(), tonic::Code::Unimplemented),
            Ok(_) => panic!("watch should be unimplemented"),
        }
    }
}
