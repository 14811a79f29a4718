use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered HTTP {status}{}", message_suffix(.message))]
    Http {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    #[error("feeder rejected the request: {0}")]
    Application(String),
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_includes_server_message() {
        let err = ApiError::Http {
            endpoint: "/api/delete-multiple".into(),
            status: 400,
            message: Some("too many paths".into()),
        };
        assert_eq!(
            err.to_string(),
            "/api/delete-multiple answered HTTP 400: too many paths"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn http_error_without_message() {
        let err = ApiError::Http {
            endpoint: "/api/stats".into(),
            status: 503,
            message: None,
        };
        assert_eq!(err.to_string(), "/api/stats answered HTTP 503");
    }
}
