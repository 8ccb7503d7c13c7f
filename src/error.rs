//! Error types.
//!
//! Engine and registry failures are deployment problems; catalog errors are
//! what a single request can run into and map one-to-one onto HTTP status
//! codes at the router boundary.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::board::OrderError;

/// Failures reported by a variant engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("map unavailable: {0}")]
    MapUnavailable(String),
}

/// Fail-fast errors while assembling the variant registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("variant '{0}' registered twice")]
    DuplicateVariant(String),

    #[error("launch schedule names unregistered variant '{0}'")]
    UnknownScheduledVariant(String),

    #[error("launch schedule lists variant '{0}' twice")]
    DuplicateScheduleEntry(String),

    #[error("variant '{name}' failed to initialise: {source}")]
    Variant {
        name: String,
        #[source]
        source: EngineError,
    },
}

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Variant \"{0}\" not found")]
    NotFound(String),

    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

impl From<OrderError> for CatalogError {
    fn from(err: OrderError) -> Self {
        CatalogError::MalformedRequest(err.to_string())
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::MalformedRequest(rejection.body_text())
    }
}

impl CatalogError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CatalogError::Engine(e) => {
                tracing::error!("Engine error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
