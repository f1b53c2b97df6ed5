//! error

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use validator::Validate;

/// Request-boundary error taxonomy. Everything here is recoverable: the
/// collector retries on its next scheduled run, the operator re-drives the
/// approval. There is no fatal class.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid-payload: {0}")]
    InvalidPayload(String),
    #[error("name-conflict: asset name `{0}` already exists")]
    NameConflict(String),
    #[error("promotion in flight for sn `{0}`, retry after it completes")]
    PromotionInFlight(String),
    #[error("duplicate serial `{0}`: concurrently approved from another source")]
    DuplicateSerial(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NameConflict(_)
            | AppError::PromotionInFlight(_)
            | AppError::DuplicateSerial(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) | AppError::Db(sea_orm::DbErr::RecordNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        }
        let body = Json(json!({
            "code": status.as_u16(),
            "msg": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Json extractor that also runs `validator` rules, rejecting with
/// `invalid-payload` instead of axum's plain-text body.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::InvalidPayload(e.body_text()))?;
        value
            .validate()
            .map_err(|e| AppError::InvalidPayload(e.to_string()))?;
        Ok(AppJson(value))
    }
}
