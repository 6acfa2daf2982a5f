//! Product Catalog Service - 服务入口

use std::sync::Arc;

use boutique_bootstrap::{build_reflection, run_server};
use boutique_errors::AppError;
use tracing::{error, info};

use product_catalog::api::CatalogServiceImpl;
use product_catalog::api::proto::FILE_DESCRIPTOR_SET;
use product_catalog::api::proto::product_catalog_service_server::{
    ProductCatalogServiceServer, SERVICE_NAME,
};
use product_catalog::application::{CatalogQueryService, CatalogStore};
use product_catalog::config::{CatalogSettings, DEFAULTS};
use product_catalog::infrastructure::FileCatalogSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server(DEFAULTS, "config", |ctx, mut server| async move {
        info!("Initializing Product Catalog Service...");

        let settings: CatalogSettings = ctx
            .section("catalog")
            .map_err(|e| AppError::internal(e.to_string()))?;

        // 首次加载失败直接终止启动
        let source = Arc::new(FileCatalogSource::new(&settings.path));
        let store = CatalogStore::open(source, settings.reload_on_read)
            .await
            .map_err(|e| {
                error!(error = %e, "could not load product catalog");
                AppError::from(e)
            })?;
        let store = Arc::new(store);

        #[cfg(unix)]
        product_catalog::infrastructure::spawn_reload_signal_listener(store.clone())
            .map_err(|e| AppError::internal(format!("Failed to install signal handler: {}", e)))?;

        let queries = CatalogQueryService::new(store, ctx.config().chaos.extra_latency);
        let catalog_service = CatalogServiceImpl::new(queries);

        // 构建反射服务
        let reflection_service = build_reflection(FILE_DESCRIPTOR_SET, SERVICE_NAME)?;

        Ok(server
            .add_service(ProductCatalogServiceServer::new(catalog_service))
            .add_service(reflection_service))
    })
    .await
}
