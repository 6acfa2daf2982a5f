//! boutique-bootstrap - 统一服务启动骨架
//!
//! 所有服务复用的启动逻辑

mod health;
mod interceptor;
mod layer;
mod metrics;
mod reflection;
mod runtime;
mod starter;

pub use health::*;
pub use interceptor::*;
pub use layer::*;
pub use metrics::*;
pub use reflection::*;
pub use runtime::*;
pub use starter::*;
