//! 运费报价

use std::fmt;

use boutique_domain_core::{Money, USD};
use serde::Deserialize;

/// 运费报价（美元）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quote {
    pub dollars: u64,
    /// 0..=99
    pub cents: u32,
}

impl Quote {
    pub const ZERO: Quote = Quote {
        dollars: 0,
        cents: 0,
    };

    pub fn from_cents(total_cents: u64) -> Self {
        Self {
            dollars: total_cents / 100,
            cents: (total_cents % 100) as u32,
        }
    }

    /// 转换为美元金额
    pub fn to_money(&self) -> Money {
        let units = i64::try_from(self.dollars).unwrap_or(i64::MAX);
        Money::from_units_and_cents(USD, units, self.cents)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.dollars, self.cents)
    }
}

/// 报价策略：基础费 + 每件附加费，零件商品免费
///
/// 默认为每单固定 $8.99。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuotePolicy {
    pub base_fee_cents: u64,
    pub per_item_cents: u64,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self {
            base_fee_cents: 899,
            per_item_cents: 0,
        }
    }
}

impl QuotePolicy {
    /// 按商品件数计算报价，随件数单调不减
    pub fn create_quote(&self, item_count: u64) -> Quote {
        if item_count == 0 {
            return Quote::ZERO;
        }

        let total = self
            .base_fee_cents
            .saturating_add(self.per_item_cents.saturating_mul(item_count));
        Quote::from_cents(total)
    }
}

/// 使用默认策略计算报价
pub fn create_quote(item_count: u64) -> Quote {
    QuotePolicy::default().create_quote(item_count)
}
