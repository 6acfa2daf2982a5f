use boutique_errors::AppError;
use thiserror::Error;
use tonic::Status;

/// 运单请求错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShippingError {
    #[error("shipping address is required")]
    MissingAddress,
    #[error("quantity for product {product_id:?} must not be negative, got {quantity}")]
    NegativeQuantity { product_id: String, quantity: i32 },
}

impl From<ShippingError> for AppError {
    fn from(error: ShippingError) -> Self {
        AppError::invalid_argument(error.to_string())
    }
}

impl From<ShippingError> for Status {
    fn from(error: ShippingError) -> Self {
        AppError::from(error).into()
    }
}
