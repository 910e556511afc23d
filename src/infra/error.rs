//! Types for reporting errors that happened during a request.
//!
//! If your function calls out to a greeting service or parses user input,
//! you likely want to return a [`ApiResult`].

use super::extract::Json;
use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::ResponseForPanic;
use utoipa::ToSchema;

/// A standard error response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// A description of the error.
    message: String,
    /// When the error happened.
    timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub(crate) fn new(message: String) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// When the error happened.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// An error from our API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An error caused by the client.
    #[error("{0}")]
    ClientError(#[from] ClientError),
    /// An internal error.
    #[error("{0}")]
    InternalError(#[from] InternalError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::ClientError(e) => e.into_response(),
            ApiError::InternalError(e) => {
                tracing::error!("internal error: {}", e);
                e.into_response()
            }
        }
    }
}

/// The result of calling API-related functions.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::InternalError(InternalError::ReqwestError(e))
    }
}

/// Errors caused by the client.
/// The client can do something to fix these.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Some illegal input was given.
    #[error("{0}")]
    BadRequest(String),
    /// Unsupported media type.
    #[error("unsupported media type")]
    UnsupportedMediaType,
    /// The resource was not found.
    #[error("not found")]
    NotFound,
    /// The input could not be processed.
    #[error("{0}")]
    UnprocessableEntity(String),
    /// Custom error.
    #[error("{1}")]
    Custom(StatusCode, String),
}

impl From<JsonRejection> for ClientError {
    fn from(value: JsonRejection) -> Self {
        match value.status() {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => ClientError::UnsupportedMediaType,
            StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::UnprocessableEntity(value.body_text())
            }
            status => ClientError::Custom(status, value.body_text()),
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> axum::response::Response {
        let msg = self.to_string();
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Custom(status, _) => status,
        };
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

/// An internal error.
/// The client cannot do anything about this.
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    /// Reqwest-call failed.
    #[error("reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    /// Integration error.
    #[error("integration error: {0}")]
    IntegrationError(String),
    /// Other miscellaneous errors.
    #[error("{0}")]
    Other(String),
}

impl IntoResponse for InternalError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::ReqwestError(ref e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::ReqwestError(_) => StatusCode::BAD_GATEWAY,
            Self::IntegrationError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut response =
            (status, Json(ErrorBody::new("internal error".to_string()))).into_response();
        response
            .headers_mut()
            .insert("Retry-After", HeaderValue::from_static("5"));
        response
    }
}

/// A handler for converting panics into proper responses for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanicHandler;

impl ResponseForPanic for PanicHandler {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(
        &mut self,
        _: Box<dyn std::any::Any + Send + 'static>,
    ) -> http::Response<Self::ResponseBody> {
        ApiError::InternalError(InternalError::Other("Panic".to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_status() {
        let res = ClientError::UnsupportedMediaType.into_response();
        assert_eq!(StatusCode::UNSUPPORTED_MEDIA_TYPE, res.status());
        let res = ClientError::Custom(StatusCode::IM_A_TEAPOT, "tea".to_string()).into_response();
        assert_eq!(StatusCode::IM_A_TEAPOT, res.status());
    }

    #[test]
    fn integration_errors_are_bad_gateway_with_retry_after() {
        let res = ApiError::from(InternalError::IntegrationError("down".to_string())).into_response();
        assert_eq!(StatusCode::BAD_GATEWAY, res.status());
        assert_eq!("5", res.headers()["Retry-After"]);
    }

    #[test]
    fn other_internal_errors_are_internal_server_error() {
        let res = InternalError::Other("oops".to_string()).into_response();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    }

    #[test]
    fn panics_become_internal_server_error() {
        let res = PanicHandler.response_for_panic(Box::new("boom"));
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    }
}
