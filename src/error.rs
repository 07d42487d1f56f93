use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure to obtain or accept the price history for an analysis.
///
/// Any `DataError` aborts the whole analysis; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("Timestamps must be strictly increasing (index {index})")]
    UnorderedTimestamps { index: usize },

    #[error("Need at least {required} bars, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Unknown period: {0}")]
    InvalidPeriod(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        DataError::Fetch(e.to_string())
    }
}

/// An indicator window is longer than the available history.
///
/// Non-fatal: the engine fills the indicator's columns with NaN and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{indicator} needs {required} bars, series has {available}")]
pub struct InsufficientDataError {
    pub indicator: String,
    pub required: usize,
    pub available: usize,
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

impl From<DataError> for AppError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::SymbolNotFound(_) => AppError::NotFound(e.to_string()),
            DataError::InvalidPeriod(_) => AppError::BadRequest(e.to_string()),
            DataError::Fetch(_) => AppError::ExternalApi(e.to_string()),
            DataError::EmptySeries
            | DataError::InvalidBar { .. }
            | DataError::UnorderedTimestamps { .. }
            | DataError::InsufficientHistory { .. } => AppError::Unprocessable(e.to_string()),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Unprocessable(msg)
            | AppError::ExternalApi(msg) => msg,
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
