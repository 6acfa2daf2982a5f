//! Proto 转换模块

use crate::api::proto;
use crate::domain::{Address, LineItem, Quote};

pub fn address_from_proto(address: proto::Address) -> Address {
    Address {
        street_address: address.street_address,
        city: address.city,
        state: address.state,
        country: address.country,
        zip_code: address.zip_code,
    }
}

pub fn items_from_proto(items: Vec<proto::CartItem>) -> Vec<LineItem> {
    items
        .into_iter()
        .map(|item| LineItem {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect()
}

pub fn quote_to_proto(quote: &Quote) -> proto::Money {
    let money = quote.to_money();
    proto::Money {
        currency_code: money.currency_code,
        units: money.units,
        nanos: money.nanos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_to_proto() {
        let money = quote_to_proto(&Quote { dollars: 8, cents: 99 });
        assert_eq!(money.currency_code, "USD");
        assert_eq!(money.units, 8);
        assert_eq!(money.nanos, 990_000_000);
    }

    #[test]
    fn test_items_from_proto() {
        let items = items_from_proto(vec![proto::CartItem {
            product_id: "66VCHSJNUP".to_string(),
            quantity: 3,
        }]);
        assert_eq!(items[0].product_id, "66VCHSJNUP");
        assert_eq!(items[0].quantity, 3);
    }
}
