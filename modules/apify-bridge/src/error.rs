use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use apify_client::ApifyError;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid API token: no user profile returned")]
    InvalidCredential,

    #[error("Provider error: {0}")]
    Provider(#[from] ApifyError),

    #[error("Webhook registration failed: {0}")]
    Registration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized callback")]
    Unauthorized,

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Validation(err.to_string())
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = match &self {
            BridgeError::Provider(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Validation(_) => StatusCode::BAD_REQUEST,
            BridgeError::Unauthorized | BridgeError::InvalidCredential => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
