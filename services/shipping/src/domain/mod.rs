//! 领域层

mod order;
mod quote;
mod tracking;

pub use order::{Address, LineItem, total_quantity};
pub use quote::{Quote, QuotePolicy, create_quote};
pub use tracking::{TrackingId, create_tracking_id, create_tracking_id_with};
