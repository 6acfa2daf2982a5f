//! gRPC 反射

use boutique_errors::{AppError, AppResult};
use tonic_reflection::pb::v1::server_reflection_server::SERVICE_NAME as REFLECTION_SERVICE_NAME;
use tonic_reflection::server::Builder;
use tonic_reflection::server::v1::{ServerReflection, ServerReflectionServer};

/// 用服务的文件描述符集构建 v1 反射服务
///
/// 只公布 `service_name` 与反射服务本身，同一 proto 包里的其他服务不会出现在列表中。
pub fn build_reflection(
    file_descriptor_set: &'static [u8],
    service_name: &'static str,
) -> AppResult<ServerReflectionServer<impl ServerReflection>> {
    Builder::configure()
        .register_encoded_file_descriptor_set(file_descriptor_set)
        .with_service_name(service_name)
        .with_service_name(REFLECTION_SERVICE_NAME)
        .build_v1()
        .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_descriptor_set_is_internal_error() {
        let result = build_reflection(b"not a descriptor set", "hipstershop.ShippingService");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
