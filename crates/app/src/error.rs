use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("db error: {0}")]
    Db(#[from] workout_db::DbError),
    #[error("ingest error: {0}")]
    Ingest(#[from] ingest::IngestError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        // Every application error is a server-side failure; the code names its layer.
        let code = match err {
            AppError::Db(_) => Some("store_error"),
            AppError::Ingest(_) => Some("ingest_error"),
            AppError::Io(_) => Some("io_error"),
            AppError::Serde(_) => Some("serialization_error"),
            AppError::Config(_) => Some("config_error"),
            AppError::Message(_) => None,
        };
        Self {
            status: 500,
            message: err.to_string(),
            code: code.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_failure_maps_to_500_with_code() {
        let api: ApiError = AppError::Config("bad port".to_string()).into();
        assert_eq!(api.status, 500);
        assert_eq!(api.code.as_deref(), Some("config_error"));
        assert_eq!(api.message, "config error: bad port");
    }

    #[test]
    fn plain_message_has_no_code() {
        let api: ApiError = AppError::Message("initialize db: locked".to_string()).into();
        assert_eq!(api.status, 500);
        assert!(api.code.is_none());
        let body = serde_json::to_value(&api).expect("serialize");
        assert!(body.get("code").is_none());
    }
}
