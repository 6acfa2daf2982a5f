use boutique_errors::AppError;
use thiserror::Error;
use tonic::Status;

/// 商品目录加载错误
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open product catalog {location}: {message}")]
    SourceUnavailable { location: String, message: String },
    #[error("failed to parse the catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid product at index {index} (id {id:?}): {reason}")]
    InvalidProduct {
        index: usize,
        id: String,
        reason: String,
    },
}

impl CatalogError {
    pub fn source_unavailable(location: impl Into<String>, message: impl ToString) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            message: message.to_string(),
        }
    }

    /// 是否为解析类错误（格式错误或条目非法）
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::InvalidProduct { .. })
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        if error.is_parse_error() {
            AppError::Parse(error.to_string())
        } else {
            AppError::SourceUnavailable(error.to_string())
        }
    }
}

impl From<CatalogError> for Status {
    fn from(error: CatalogError) -> Self {
        AppError::from(error).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_maps_to_unavailable() {
        let err = CatalogError::source_unavailable("products.json", "No such file or directory");
        assert!(!err.is_parse_error());
        let status: Status = err.into();
        assert_eq!(status.code(), tonic::Code::Unavailable);
        assert!(status.message().contains("products.json"));
    }

    #[test]
    fn test_parse_error_maps_to_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CatalogError::from(json_err);
        assert!(err.is_parse_error());
        assert_eq!(AppError::from(err).grpc_code(), tonic::Code::Internal);
    }
}
