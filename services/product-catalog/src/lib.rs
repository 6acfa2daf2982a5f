//! Product Catalog Service
//!
//! 提供商品列表、按 ID 查询与关键字搜索，目录来自可热重载的 JSON 文件

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
