//! RPC 追踪 / 统计中间件
//!
//! 统一包裹所有 gRPC 方法：建立请求 span（上游 `traceparent` 作为父级）、记录耗时与状态码、
//! 写入 Prometheus 指标。
//! 关闭时直接透传请求。

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use boutique_telemetry::{record_grpc_request, set_parent_from_headers};
use http::{HeaderMap, Request, Response};
use tower::{Layer, Service};
use tracing::{Instrument, info, info_span};

use crate::interceptor::{TraceInfo, extract_trace_id};

/// RPC 追踪层
#[derive(Debug, Clone, Copy)]
pub struct RpcTelemetryLayer {
    enabled: bool,
}

impl RpcTelemetryLayer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl<S> Layer<S> for RpcTelemetryLayer {
    type Service = RpcTelemetry<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RpcTelemetry {
            inner,
            enabled: self.enabled,
        }
    }
}

/// 被 [`RpcTelemetryLayer`] 包裹的服务
#[derive(Debug, Clone)]
pub struct RpcTelemetry<S> {
    inner: S,
    enabled: bool,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RpcTelemetry<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        // 取走已就绪的 inner，留下克隆体给下一次 poll_ready
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if !self.enabled {
            return Box::pin(inner.call(request));
        }

        let trace_id = extract_trace_id(request.headers());
        let (service, method) = split_grpc_path(request.uri().path());
        request.extensions_mut().insert(TraceInfo {
            trace_id: trace_id.clone(),
        });

        let span = info_span!(
            "grpc_request",
            rpc.service = %service,
            rpc.method = %method,
            trace_id = %trace_id
        );
        set_parent_from_headers(&span, request.headers());

        Box::pin(
            async move {
                let started = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

                let status = match &result {
                    Ok(response) => grpc_status(response.headers()),
                    Err(_) => "TransportError".to_string(),
                };

                info!(grpc.status = %status, elapsed_ms, "Request completed");
                record_grpc_request(&service, &method, &status, elapsed_ms);

                result
            }
            .instrument(span),
        )
    }
}

/// 拆分 gRPC 路径 `/package.Service/Method`
fn split_grpc_path(path: &str) -> (String, String) {
    let trimmed = path.trim_start_matches('/');
    match trimmed.split_once('/') {
        Some((service, method)) => (service.to_string(), method.to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// 读取响应头中的 grpc-status
///
/// 处理器返回错误时 tonic 以 trailers-only 响应写入头部；
/// 成功响应的状态位于 trailers 中，此处视为 Ok。
fn grpc_status(headers: &HeaderMap) -> String {
    let code = headers
        .get("grpc-status")
        .map(|v| tonic::Code::from_bytes(v.as_bytes()))
        .unwrap_or(tonic::Code::Ok);
    format!("{:?}", code)
}
