//! 商品目录查询

use std::sync::Arc;
use std::time::Duration;

use boutique_errors::{AppError, AppResult};
use tracing::debug;

use crate::application::CatalogStore;
use crate::domain::{Catalog, Product};

/// 商品目录查询服务
///
/// 每次查询前等待配置的额外延迟，延迟期间不持有任何锁。
pub struct CatalogQueryService {
    store: Arc<CatalogStore>,
    extra_latency: Duration,
}

impl CatalogQueryService {
    pub fn new(store: Arc<CatalogStore>, extra_latency: Duration) -> Self {
        Self {
            store,
            extra_latency,
        }
    }

    async fn inject_latency(&self) {
        if !self.extra_latency.is_zero() {
            tokio::time::sleep(self.extra_latency).await;
        }
    }

    /// 列出全部商品
    pub async fn list_products(&self) -> Arc<Catalog> {
        self.inject_latency().await;
        self.store.current_products().await
    }

    /// 按 ID 获取商品
    pub async fn get_product(&self, id: &str) -> AppResult<Product> {
        self.inject_latency().await;

        let catalog = self.store.current_products().await;
        catalog
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("no product with ID {}", id)))
    }

    /// 按名称或描述搜索商品
    pub async fn search_products(&self, query: &str) -> Vec<Product> {
        self.inject_latency().await;

        let catalog = self.store.current_products().await;
        let results = catalog.search(query);
        debug!(query = %query, results = results.len(), "Catalog search finished");
        results
    }
}
