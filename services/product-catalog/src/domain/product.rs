//! 商品实体

use boutique_domain_core::Money;
use serde::{Deserialize, Serialize};

/// 商品
///
/// 加载后不可变，目录重载时整体替换。
/// JSON 字段同时接受 protobuf JSON 命名（`priceUsd`）与原始字段名（`price_usd`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default, alias = "price_usd")]
    pub price_usd: Option<Money>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    /// 校验商品条目
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("product id must not be empty".to_string());
        }

        if let Some(price) = &self.price_usd {
            price.validate().map_err(|e| format!("invalid price: {}", e))?;
        }

        Ok(())
    }

    /// 名称或描述是否包含查询串（调用方负责转小写）
    pub(crate) fn matches_lowercase(&self, lowered_query: &str) -> bool {
        self.name.to_lowercase().contains(lowered_query)
            || self.description.to_lowercase().contains(lowered_query)
    }
}
