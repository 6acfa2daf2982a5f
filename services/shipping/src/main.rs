//! Shipping Service - 服务入口

use boutique_bootstrap::{build_reflection, run_server};
use boutique_errors::AppError;
use tracing::info;

use shipping::api::ShippingServiceImpl;
use shipping::api::proto::FILE_DESCRIPTOR_SET;
use shipping::api::proto::shipping_service_server::{SERVICE_NAME, ShippingServiceServer};
use shipping::application::ShippingQueryService;
use shipping::config::DEFAULTS;
use shipping::domain::QuotePolicy;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server(DEFAULTS, "config", |ctx, mut server| async move {
        info!("Initializing Shipping Service...");

        let policy: QuotePolicy = ctx
            .section("quote")
            .map_err(|e| AppError::internal(e.to_string()))?;
        info!(
            base_fee_cents = policy.base_fee_cents,
            per_item_cents = policy.per_item_cents,
            "Quote policy loaded"
        );

        let queries = ShippingQueryService::new(policy, ctx.config().chaos.extra_latency);
        let shipping_service = ShippingServiceImpl::new(queries);

        // 构建反射服务
        let reflection_service = build_reflection(FILE_DESCRIPTOR_SET, SERVICE_NAME)?;

        Ok(server
            .add_service(ShippingServiceServer::new(shipping_service))
            .add_service(reflection_service))
    })
    .await
}
