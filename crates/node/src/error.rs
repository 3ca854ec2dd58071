//! Error types for the node service and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use nothing_core::store::StoreError;
use nothing_core::CoreError;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON error body, shape-compatible with the original API surface.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl NodeError {
    fn status(&self) -> StatusCode {
        match self {
            NodeError::Core(CoreError::ProposalNotFound(_)) => StatusCode::NOT_FOUND,
            NodeError::Core(_) => StatusCode::BAD_REQUEST,
            NodeError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status == StatusCode::NOT_FOUND {
            "Not found"
        } else if status == StatusCode::BAD_REQUEST {
            "Bad request"
        } else {
            "Service unavailable"
        };
        let body = ErrorBody {
            error: error.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
