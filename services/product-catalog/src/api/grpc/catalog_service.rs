//! ProductCatalogService gRPC 服务实现

use boutique_bootstrap::trace_id;
use tonic::{Request, Response, Status};
use tracing::info;

use super::conversions::product_to_proto;
use crate::api::proto::{
    Empty, GetProductRequest, ListProductsResponse, Product as ProtoProduct, SearchProductsRequest,
    SearchProductsResponse, product_catalog_service_server::ProductCatalogService,
};
use crate::application::CatalogQueryService;

/// ProductCatalog gRPC 服务
pub struct CatalogServiceImpl {
    queries: CatalogQueryService,
}

impl CatalogServiceImpl {
    pub fn new(queries: CatalogQueryService) -> Self {
        Self { queries }
    }
}

#[tonic::async_trait]
impl ProductCatalogService for CatalogServiceImpl {
    async fn list_products(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let catalog = self.queries.list_products().await;

        Ok(Response::new(ListProductsResponse {
            products: catalog.products().iter().map(product_to_proto).collect(),
        }))
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<ProtoProduct>, Status> {
        let trace_id = trace_id(&request).map(str::to_string);
        let req = request.into_inner();

        let product = self.queries.get_product(&req.id).await.map_err(|e| {
            info!(
                product_id = %req.id,
                trace_id = trace_id.as_deref().unwrap_or("-"),
                "Product not found"
            );
            Status::from(e)
        })?;

        Ok(Response::new(product_to_proto(&product)))
    }

    async fn search_products(
        &self,
        request: Request<SearchProductsRequest>,
    ) -> Result<Response<SearchProductsResponse>, Status> {
        let req = request.into_inner();

        let results = self.queries.search_products(&req.query).await;

        Ok(Response::new(SearchProductsResponse {
            results: results.iter().map(product_to_proto).collect(),
        }))
    }
}
