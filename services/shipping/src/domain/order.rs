//! 运单请求值对象

use crate::error::ShippingError;

/// 收货地址
///
/// 字段不做存在性校验，原样拼接进追踪号种子。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: i32,
}

impl Address {
    /// 生成追踪号用的地址串 `"<street>, <city>, <state>"`
    pub fn base_address(&self) -> String {
        format!("{}, {}, {}", self.street_address, self.city, self.state)
    }
}

/// 购物车条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: i32,
}

/// 汇总商品件数，拒绝负数数量
pub fn total_quantity(items: &[LineItem]) -> Result<u64, ShippingError> {
    items.iter().try_fold(0u64, |total, item| {
        let quantity = u64::try_from(item.quantity).map_err(|_| ShippingError::NegativeQuantity {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
        })?;
        Ok(total.saturating_add(quantity))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: i32) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_base_address() {
        let address = Address {
            street_address: "1600 Amphitheatre Pkwy".to_string(),
            city: "Mountain View".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
            zip_code: 94043,
        };
        assert_eq!(address.base_address(), "1600 Amphitheatre Pkwy, Mountain View, CA");
    }

    #[test]
    fn test_total_quantity() {
        assert_eq!(total_quantity(&[]), Ok(0));
        assert_eq!(total_quantity(&[item("A", 2), item("B", 3)]), Ok(5));
    }

    #[test]
    fn test_total_quantity_rejects_negative() {
        let result = total_quantity(&[item("A", 2), item("B", -1)]);
        assert_eq!(
            result,
            Err(ShippingError::NegativeQuantity {
                product_id: "B".to_string(),
                quantity: -1,
            })
        );
    }
}
