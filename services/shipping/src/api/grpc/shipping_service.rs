//! ShippingService gRPC 服务实现

use boutique_bootstrap::trace_id;
use boutique_errors::AppError;
use tonic::{Request, Response, Status};
use tracing::warn;

use super::conversions::{address_from_proto, items_from_proto, quote_to_proto};
use crate::api::proto::{
    GetQuoteRequest, GetQuoteResponse, ShipOrderRequest, ShipOrderResponse,
    shipping_service_server::ShippingService,
};
use crate::application::ShippingQueryService;

/// Shipping gRPC 服务
pub struct ShippingServiceImpl {
    queries: ShippingQueryService,
}

impl ShippingServiceImpl {
    pub fn new(queries: ShippingQueryService) -> Self {
        Self { queries }
    }
}

#[tonic::async_trait]
impl ShippingService for ShippingServiceImpl {
    async fn get_quote(
        &self,
        request: Request<GetQuoteRequest>,
    ) -> Result<Response<GetQuoteResponse>, Status> {
        let trace_id = trace_id(&request).map(str::to_string);
        let req = request.into_inner();
        let items = items_from_proto(req.items);

        let quote = self
            .queries
            .get_quote(&items)
            .await
            .map_err(|e| rejected("GetQuote", trace_id.as_deref(), e))?;

        Ok(Response::new(GetQuoteResponse {
            cost_usd: Some(quote_to_proto(&quote)),
        }))
    }

    async fn ship_order(
        &self,
        request: Request<ShipOrderRequest>,
    ) -> Result<Response<ShipOrderResponse>, Status> {
        let trace_id = trace_id(&request).map(str::to_string);
        let req = request.into_inner();
        let address = req.address.map(address_from_proto);
        let items = items_from_proto(req.items);

        let tracking_id = self
            .queries
            .ship_order(address.as_ref(), &items)
            .await
            .map_err(|e| rejected("ShipOrder", trace_id.as_deref(), e))?;

        Ok(Response::new(ShipOrderResponse {
            tracking_id: tracking_id.into_string(),
        }))
    }
}

fn rejected(method: &str, trace_id: Option<&str>, error: AppError) -> Status {
    warn!(
        method,
        trace_id = trace_id.unwrap_or("-"),
        error = %error,
        "Request rejected"
    );
    error.into()
}
