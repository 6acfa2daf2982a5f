//! 目录数据源接口

use async_trait::async_trait;

use crate::error::CatalogError;

/// 商品目录数据源
///
/// 只读，每次调用返回完整的 JSON 文档。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// 数据源描述，用于日志
    fn describe(&self) -> String;

    /// 读取完整文档
    async fn read(&self) -> Result<Vec<u8>, CatalogError>;
}
