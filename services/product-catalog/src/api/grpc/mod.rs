//! gRPC 服务模块

mod catalog_service;
mod conversions;

pub use catalog_service::CatalogServiceImpl;
