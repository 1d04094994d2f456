//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpError>`; status, body and log level all come
//! from the wrapped error's `ErrorMetadata`.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resizer_core::{ErrorMetadata, LogLevel};
use resizer_processing::ResizeError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether re-sending the same request could succeed
    pub recoverable: bool,
}

/// Error returned by HTTP handlers
#[derive(Debug)]
pub enum HttpError {
    Resize(ResizeError),
    /// Body was missing, too large or not the expected JSON shape
    InvalidBody { status: u16, message: String },
}

impl From<ResizeError> for HttpError {
    fn from(err: ResizeError) -> Self {
        HttpError::Resize(err)
    }
}

/// Convert JSON body deserialization failures into our ErrorResponse format.
impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::InvalidBody {
            status: rejection.status().as_u16(),
            message: format!("Invalid request body: {}", rejection.body_text()),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Resize(err) => write!(f, "{}", err),
            HttpError::InvalidBody { message, .. } => write!(f, "{}", message),
        }
    }
}

impl ErrorMetadata for HttpError {
    fn http_status_code(&self) -> u16 {
        match self {
            HttpError::Resize(err) => err.http_status_code(),
            HttpError::InvalidBody { status, .. } => *status,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            HttpError::Resize(err) => err.error_code(),
            HttpError::InvalidBody { .. } => "INVALID_REQUEST_BODY",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            HttpError::Resize(err) => err.is_recoverable(),
            HttpError::InvalidBody { .. } => false,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            HttpError::Resize(err) => err.log_level(),
            HttpError::InvalidBody { .. } => LogLevel::Debug,
        }
    }
}

/// JSON body extractor that answers with `ErrorResponse` on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &HttpError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Request failed");
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self);

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            recoverable: self.is_recoverable(),
        });

        (status, body).into_response()
    }
}
