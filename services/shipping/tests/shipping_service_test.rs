//! ShippingService 集成测试
//!
//! 直接调用 gRPC 服务实现

use std::time::Duration;

use shipping::api::ShippingServiceImpl;
use shipping::api::proto::shipping_service_server::ShippingService;
use shipping::api::proto::{Address, CartItem, GetQuoteRequest, ShipOrderRequest};
use shipping::application::ShippingQueryService;
use shipping::domain::{QuotePolicy, create_quote};
use tonic::{Code, Request};

fn service(latency: Duration) -> ShippingServiceImpl {
    ShippingServiceImpl::new(ShippingQueryService::new(QuotePolicy::default(), latency))
}

fn cart(quantities: &[i32]) -> Vec<CartItem> {
    quantities
        .iter()
        .enumerate()
        .map(|(i, &quantity)| CartItem {
            product_id: format!("PRODUCT-{}", i),
            quantity,
        })
        .collect()
}

fn mountain_view() -> Address {
    Address {
        street_address: "1600 Amphitheatre Parkway".to_string(),
        city: "Mountain View".to_string(),
        state: "CA".to_string(),
        country: "USA".to_string(),
        zip_code: 94043,
    }
}

#[tokio::test]
async fn test_get_quote_sums_item_quantities() {
    let service = service(Duration::ZERO);

    let cost = service
        .get_quote(Request::new(GetQuoteRequest {
            address: Some(mountain_view()),
            items: cart(&[2, 3]),
        }))
        .await
        .unwrap()
        .into_inner()
        .cost_usd
        .unwrap();

    let expected = create_quote(5).to_money();
    assert_eq!(cost.currency_code, expected.currency_code);
    assert_eq!(cost.units, expected.units);
    assert_eq!(cost.nanos, expected.nanos);
    assert_eq!((cost.units, cost.nanos), (8, 990_000_000));
}

#[tokio::test]
async fn test_get_quote_without_items_is_free() {
    let service = service(Duration::ZERO);

    let cost = service
        .get_quote(Request::new(GetQuoteRequest {
            address: None,
            items: vec![],
        }))
        .await
        .unwrap()
        .into_inner()
        .cost_usd
        .unwrap();

    assert_eq!(cost.currency_code, "USD");
    assert_eq!((cost.units, cost.nanos), (0, 0));
}

#[tokio::test]
async fn test_get_quote_rejects_negative_quantity() {
    let service = service(Duration::ZERO);

    let status = service
        .get_quote(Request::new(GetQuoteRequest {
            address: Some(mountain_view()),
            items: cart(&[1, -2]),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_ship_order_returns_tracking_id() {
    let service = service(Duration::ZERO);
    let base_address = "1600 Amphitheatre Parkway, Mountain View, CA";

    let tracking_id = service
        .ship_order(Request::new(ShipOrderRequest {
            address: Some(mountain_view()),
            items: cart(&[1]),
        }))
        .await
        .unwrap()
        .into_inner()
        .tracking_id;

    assert!(!tracking_id.is_empty());
    let parts: Vec<&str> = tracking_id.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[1].starts_with(&base_address.len().to_string()));
    assert!(parts[2].starts_with(&(base_address.len() / 2).to_string()));
}

#[tokio::test]
async fn test_ship_order_requires_address() {
    let service = service(Duration::ZERO);

    let status = service
        .ship_order(Request::new(ShipOrderRequest {
            address: None,
            items: cart(&[1]),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_ship_order_rejects_negative_quantity() {
    let service = service(Duration::ZERO);

    let status = service
        .ship_order(Request::new(ShipOrderRequest {
            address: Some(mountain_view()),
            items: cart(&[-1]),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test(start_paused = true)]
async fn test_extra_latency_is_applied() {
    let service = service(Duration::from_millis(1500));

    let started = tokio::time::Instant::now();
    service
        .get_quote(Request::new(GetQuoteRequest {
            address: None,
            items: cart(&[1]),
        }))
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1500));
}
