//! gRPC 服务模块

mod conversions;
mod shipping_service;

pub use shipping_service::ShippingServiceImpl;
