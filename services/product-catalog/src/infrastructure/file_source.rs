//! 文件目录数据源

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::CatalogSource;
use crate::error::CatalogError;

/// 从本地 JSON 文件读取目录
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<Vec<u8>, CatalogError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::source_unavailable(self.describe(), e))
    }
}
