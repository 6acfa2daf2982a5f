//! 应用层模块

mod catalog_queries;
mod catalog_store;

pub use catalog_queries::CatalogQueryService;
pub use catalog_store::{CatalogStore, ReloadControl};
