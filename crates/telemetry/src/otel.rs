//! OTLP 追踪导出与 W3C Trace Context 传播

use http::HeaderMap;
use opentelemetry::propagation::{Extractor, TextMapCompositePropagator};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{ExporterBuildError, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider, Tracer};
use tracing_opentelemetry::{OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::Registry;

/// OTLP 导出目标
#[derive(Debug, Clone, Copy)]
pub struct OtlpExport<'a> {
    pub service_name: &'a str,
    /// gRPC 收集器地址，如 "http://otel-collector:4317"
    pub endpoint: &'a str,
}

/// 构建批量导出到 OTLP 收集器的 TracerProvider
///
/// 全采样。收集器连接延迟建立，需在 tokio 运行时内调用。
pub fn build_tracer_provider(
    export: OtlpExport<'_>,
) -> Result<SdkTracerProvider, ExporterBuildError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(export.endpoint)
        .build()?;

    let resource = Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", export.service_name.to_string())])
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(resource)
        .build())
}

/// 注册为全局 provider，启用 TraceContext + Baggage 传播，返回 tracing 层
pub(crate) fn install(provider: &SdkTracerProvider) -> OpenTelemetryLayer<Registry, Tracer> {
    global::set_tracer_provider(provider.clone());
    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ]));

    OpenTelemetryLayer::new(provider.tracer("boutique"))
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// 以请求头中的上游追踪上下文作为 span 的父级
///
/// 未启用 OTLP 时全局传播器为空实现，调用无副作用。
pub fn set_parent_from_headers(span: &tracing::Span, headers: &HeaderMap) {
    let parent = global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(headers))
    });
    let _ = span.set_parent(parent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_tracer_provider() {
        let provider = build_tracer_provider(OtlpExport {
            service_name: "shippingservice",
            endpoint: "http://127.0.0.1:4317",
        });
        assert!(provider.is_ok());
    }

    #[test]
    fn test_header_extractor() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "traceparent",
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01".parse().unwrap(),
        );

        let extractor = HeaderExtractor(&headers);
        assert_eq!(
            extractor.get("traceparent"),
            Some("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")
        );
        assert_eq!(extractor.get("baggage"), None);
        assert_eq!(extractor.keys(), vec!["traceparent"]);
    }

    #[test]
    fn test_set_parent_without_exporter() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "traceparent",
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01".parse().unwrap(),
        );

        let span = tracing::info_span!("grpc_request");
        set_parent_from_headers(&span, &headers);
    }
}
