//! Shipping Service
//!
//! 运费报价与模拟发货

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
