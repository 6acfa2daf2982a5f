//! gRPC 生成代码引入

tonic::include_proto!("hipstershop");

/// 文件描述符集 (用于 gRPC 反射)
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("shipping_descriptor");
