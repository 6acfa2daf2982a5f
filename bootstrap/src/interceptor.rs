//! 追踪 ID 提取
//!
//! 从请求元数据中提取追踪 ID (Trace ID / Correlation ID)，
//! 由 [`crate::RpcTelemetryLayer`] 注入到请求扩展和日志上下文中。

use http::HeaderMap;
use uuid::Uuid;

/// W3C Trace Context 头
pub const TRACEPARENT: &str = "traceparent";

/// `traceparent` 之后按优先级查找的元数据键
const CORRELATION_HEADERS: [&str; 2] = ["x-request-id", "x-correlation-id"];

/// 追踪信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceInfo {
    pub trace_id: String,
}

/// 提取追踪 ID，都没有则生成一个
///
/// 优先级：`x-trace-id` > `traceparent` 中的 trace-id > `x-request-id` > `x-correlation-id`
pub fn extract_trace_id(headers: &HeaderMap) -> String {
    header_value(headers, "x-trace-id")
        .or_else(|| header_value(headers, TRACEPARENT).and_then(parse_traceparent))
        .or_else(|| {
            CORRELATION_HEADERS
                .iter()
                .find_map(|name| header_value(headers, name))
        })
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// 解析 `00-<32 位 trace-id>-<16 位 parent-id>-<flags>`，全零 trace-id 无效
fn parse_traceparent(value: &str) -> Option<&str> {
    let mut parts = value.trim().split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let parent_id = parts.next()?;
    parts.next()?;

    let valid = version.len() == 2
        && version != "ff"
        && trace_id.len() == 32
        && parent_id.len() == 16
        && trace_id.bytes().all(|b| b.is_ascii_hexdigit())
        && trace_id.bytes().any(|b| b != b'0');
    valid.then_some(trace_id)
}

/// 从 gRPC 请求扩展中读取追踪 ID
pub fn trace_id<T>(request: &tonic::Request<T>) -> Option<&str> {
    request
        .extensions()
        .get::<TraceInfo>()
        .map(|t| t.trace_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_header_priority() {
        let mut headers = HeaderMap::new();
        headers.insert("x-correlation-id", "corr-1".parse().unwrap());
        headers.insert("x-request-id", "req-1".parse().unwrap());
        assert_eq!(extract_trace_id(&headers), "req-1");

        headers.insert("x-trace-id", "trace-1".parse().unwrap());
        assert_eq!(extract_trace_id(&headers), "trace-1");
    }

    #[test]
    fn test_traceparent_trace_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "req-1".parse().unwrap());
        headers.insert(
            TRACEPARENT,
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01".parse().unwrap(),
        );
        assert_eq!(extract_trace_id(&headers), "4bf92f3577b34da6a3ce929d0e0e4736");

        headers.insert("x-trace-id", "trace-1".parse().unwrap());
        assert_eq!(extract_trace_id(&headers), "trace-1");
    }

    #[test]
    fn test_invalid_traceparent_is_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "req-1".parse().unwrap());

        for value in [
            "garbage",
            "00-00000000000000000000000000000000-00f067aa0ba902b7-01",
            "00-4bf92f3577b34da6-00f067aa0ba902b7-01",
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7",
        ] {
            headers.insert(TRACEPARENT, value.parse().unwrap());
            assert_eq!(extract_trace_id(&headers), "req-1", "{}", value);
        }
    }

    #[test]
    fn test_generated_when_missing() {
        let headers = HeaderMap::new();
        let id = extract_trace_id(&headers);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_trace_id_from_request_extensions() {
        let mut request = tonic::Request::new(());
        assert_eq!(trace_id(&request), None);

        request.extensions_mut().insert(TraceInfo {
            trace_id: "abc".to_string(),
        });
        assert_eq!(trace_id(&request), Some("abc"));
    }
}
