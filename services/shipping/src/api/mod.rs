//! API 层模块

pub mod grpc;
pub mod proto;

pub use grpc::ShippingServiceImpl;
