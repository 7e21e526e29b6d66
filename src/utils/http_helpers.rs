use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::catalogue::CatalogueError;
use crate::session::SessionError;
use crate::shell::ShellError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into a JSON `{"error": ...}` response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ShellError> for HTTPError {
    fn from(e: ShellError) -> Self {
        match e {
            ShellError::Session(session) => {
                let status = match &session {
                    SessionError::Invalid(_) => StatusCode::BAD_REQUEST,
                    SessionError::Api { status, .. } => match *status {
                        400 | 401 | 403 => StatusCode::UNAUTHORIZED,
                        _ => StatusCode::BAD_GATEWAY,
                    },
                    SessionError::Rejected(_) => StatusCode::UNAUTHORIZED,
                    SessionError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    SessionError::Network(_) | SessionError::Decode(_) => StatusCode::BAD_GATEWAY,
                };
                HTTPError::new(status, session.user_message())
            }
            ShellError::Storage(storage) => {
                tracing::error!("Storage error: {}", storage);
                HTTPError::new(StatusCode::INSUFFICIENT_STORAGE, storage.to_string())
            }
        }
    }
}

/// Extractor rejections keep axum's status but answer in the JSON error shape.
macro_rules! rejection_into_http_error {
    ($($rejection:ty),+) => {
        $(impl From<$rejection> for HTTPError {
            fn from(rejection: $rejection) -> Self {
                HTTPError::new(rejection.status(), rejection.body_text())
            }
        })+
    };
}

rejection_into_http_error!(JsonRejection, PathRejection, QueryRejection);

/// Sign-up failures. The account API answers form validation problems (taken
/// email, weak password) with 400, which is a bad request here rather than a
/// failed login.
pub fn sign_up_error(e: ShellError) -> HTTPError {
    match e {
        ShellError::Session(SessionError::Api {
            status: 400,
            message,
        }) => HTTPError::new(StatusCode::BAD_REQUEST, message),
        other => other.into(),
    }
}

impl From<CatalogueError> for HTTPError {
    fn from(e: CatalogueError) -> Self {
        match e {
            CatalogueError::InvalidQuery(message) => HTTPError::new(StatusCode::BAD_REQUEST, message),
            other => {
                tracing::warn!("Pet catalogue unavailable: {}", other);
                HTTPError::new(StatusCode::BAD_GATEWAY, "Pet listing is unavailable")
            }
        }
    }
}
