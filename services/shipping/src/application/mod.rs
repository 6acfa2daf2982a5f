//! 应用层模块

mod shipping_queries;

pub use shipping_queries::ShippingQueryService;
