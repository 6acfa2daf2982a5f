//! 商品目录

use serde::Deserialize;

use crate::domain::Product;
use crate::error::CatalogError;

/// 目录 JSON 文档：`{"products": [...]}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<Product>,
}

/// 商品目录
///
/// 按加载顺序保存商品。目录要么整体有效，要么解析失败，不存在部分加载。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// 解析目录 JSON 并校验所有条目
    pub fn parse(bytes: &[u8]) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_slice(bytes)?;

        for (index, product) in document.products.iter().enumerate() {
            product
                .validate()
                .map_err(|reason| CatalogError::InvalidProduct {
                    index,
                    id: product.id.clone(),
                    reason,
                })?;
        }

        Ok(Self::new(document.products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// 按 ID 查找商品
    ///
    /// ID 重复时返回最后一个匹配项，后出现的条目覆盖先出现的条目。
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().rev().find(|p| p.id == id)
    }

    /// 名称或描述包含查询串（不区分大小写）的商品，保持目录顺序
    ///
    /// 空查询匹配全部商品。
    pub fn search(&self, query: &str) -> Vec<Product> {
        let lowered = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_lowercase(&lowered))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, description: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            picture: String::new(),
            price_usd: None,
            categories: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("OLJCESPC7Z", "Sunglasses", "Add a modern touch to your outfits"),
            product("1YMWWN1N4O", "Watch", "Gold-tone stainless steel"),
            product("6E92ZMYYFZ", "Mug", "A simple mug with a mustard interior"),
        ])
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.find_by_id("1YMWWN1N4O").unwrap().name, "Watch");
        assert!(catalog.find_by_id("nonexistent").is_none());
    }

    #[test]
    fn test_find_by_id_returns_last_duplicate() {
        let catalog = Catalog::new(vec![
            product("DUP", "First", ""),
            product("OTHER", "Other", ""),
            product("DUP", "Second", ""),
        ]);
        assert_eq!(catalog.find_by_id("DUP").unwrap().name, "Second");
    }

    #[test]
    fn test_empty_query_matches_everything_in_order() {
        let catalog = catalog();
        assert_eq!(catalog.search(""), catalog.products().to_vec());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.search("MUSTARD"), catalog.search("mustard"));
        assert_eq!(catalog.search("Mug").len(), 1);
    }

    #[test]
    fn test_search_matches_description() {
        let catalog = catalog();
        let results = catalog.search("stainless");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1YMWWN1N4O");
    }

    #[test]
    fn test_parse_valid_document() {
        let json = br#"{"products": [
            {"id": "A", "name": "Alpha",
             "priceUsd": {"currencyCode": "USD", "units": 1, "nanos": 0}},
            {"id": "B", "name": "Beta", "categories": ["kitchen"]}
        ]}"#;
        let catalog = Catalog::parse(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[1].categories, vec!["kitchen".to_string()]);
    }

    #[test]
    fn test_parse_empty_document() {
        let catalog = Catalog::parse(b"{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = Catalog::parse(b"{\"products\": [").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_parse_schema_mismatch() {
        let err = Catalog::parse(br#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));

        let err = Catalog::parse(br#"{"products": [{"id": 42}]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_entry() {
        let json = br#"{"products": [
            {"id": "A", "name": "Alpha"},
            {"id": "", "name": "Nameless"}
        ]}"#;
        let err = Catalog::parse(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidProduct { index: 1, .. }));
    }
}
