//! Proto 转换模块
//!
//! 将领域模型转换为 Proto 消息

use boutique_domain_core::Money;

use crate::api::proto;
use crate::domain::Product;

pub fn money_to_proto(money: &Money) -> proto::Money {
    proto::Money {
        currency_code: money.currency_code.clone(),
        units: money.units,
        nanos: money.nanos,
    }
}

pub fn product_to_proto(product: &Product) -> proto::Product {
    proto::Product {
        id: product.id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        picture: product.picture.clone(),
        price_usd: product.price_usd.as_ref().map(money_to_proto),
        categories: product.categories.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_to_proto() {
        let product = Product {
            id: "OLJCESPC7Z".to_string(),
            name: "Sunglasses".to_string(),
            description: "Add a modern touch".to_string(),
            picture: "/static/img/products/sunglasses.jpg".to_string(),
            price_usd: Some(Money::from_units_and_cents("USD", 19, 99)),
            categories: vec!["accessories".to_string()],
        };

        let proto = product_to_proto(&product);
        assert_eq!(proto.id, "OLJCESPC7Z");
        assert_eq!(proto.categories, vec!["accessories".to_string()]);
        let price = proto.price_usd.unwrap();
        assert_eq!(price.currency_code, "USD");
        assert_eq!(price.units, 19);
        assert_eq!(price.nanos, 990_000_000);
    }
}
