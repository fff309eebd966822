use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Upstream status {}", .0.as_u16())]
    UpstreamUnavailable(reqwest::StatusCode),

    #[error("Data route status {}", .0.as_u16())]
    DataRouteStatus(reqwest::StatusCode),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("price field not found")]
    PriceNotFound,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for the `outcome` of failed lookups in the request counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            Error::UpstreamUnavailable(_) => "upstream",
            Error::PriceNotFound => "not_found",
            _ => "error",
        }
    }

    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            "unknown".to_string()
        } else {
            message
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };

        (
            self.status_code(),
            [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
            Json(body),
        )
            .into_response()
    }
}
