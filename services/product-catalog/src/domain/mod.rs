//! 领域层

mod catalog;
mod product;
mod source;

pub use catalog::Catalog;
pub use product::Product;
pub use source::CatalogSource;

#[cfg(test)]
pub use source::MockCatalogSource;
