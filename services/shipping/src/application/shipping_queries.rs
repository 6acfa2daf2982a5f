//! 运费报价与发货

use std::time::Duration;

use boutique_errors::AppResult;
use tracing::info;

use crate::domain::{
    Address, LineItem, Quote, QuotePolicy, TrackingId, create_tracking_id, total_quantity,
};
use crate::error::ShippingError;

/// 运费查询服务
///
/// 不持有共享状态，请求之间互不影响。
pub struct ShippingQueryService {
    policy: QuotePolicy,
    extra_latency: Duration,
}

impl ShippingQueryService {
    pub fn new(policy: QuotePolicy, extra_latency: Duration) -> Self {
        Self {
            policy,
            extra_latency,
        }
    }

    async fn inject_latency(&self) {
        if !self.extra_latency.is_zero() {
            tokio::time::sleep(self.extra_latency).await;
        }
    }

    /// 计算运费报价
    pub async fn get_quote(&self, items: &[LineItem]) -> AppResult<Quote> {
        self.inject_latency().await;
        info!("[GetQuote] received request");

        let count = total_quantity(items)?;
        let quote = self.policy.create_quote(count);

        info!(items = count, quote = %quote, "[GetQuote] completed request");
        Ok(quote)
    }

    /// 模拟发货并返回追踪号
    pub async fn ship_order(
        &self,
        address: Option<&Address>,
        items: &[LineItem],
    ) -> AppResult<TrackingId> {
        self.inject_latency().await;
        info!("[ShipOrder] received request");

        let address = address.ok_or(ShippingError::MissingAddress)?;
        total_quantity(items)?;

        let tracking_id = create_tracking_id(&address.base_address());

        info!(tracking_id = %tracking_id, "[ShipOrder] completed request");
        Ok(tracking_id)
    }
}
