//! Error taxonomy shared by the managers and the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::server::metrics;

#[derive(Error, Debug)]
pub enum RiffError {
    /// The request is malformed or breaks a domain rule.
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Datastore or infrastructure fault.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type RiffResult<T> = Result<T, RiffError>;

impl RiffError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

/// Normalizes an id received from a client: ids are compared in trimmed
/// string form, and an empty id is a validation error.
pub fn require_id(raw: &str, field: &str) -> RiffResult<String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(RiffError::validation(format!("{} is required", field)));
    }
    Ok(id.to_string())
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for RiffError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        metrics::record_error(self.kind());
        let body = match &self {
            Self::Internal(cause) => {
                error!("Internal error: {:#}", cause);
                ErrorBody {
                    success: false,
                    message: "Something went wrong, please try again".to_string(),
                    error: Some(format!("{:#}", cause)),
                }
            }
            _ => {
                debug!("Client error ({}): {}", status.as_u16(), self);
                ErrorBody {
                    success: false,
                    message: self.to_string(),
                    error: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use http_body_util::BodyExt;

    #[test]
    fn maps_kinds_to_status_codes() {
        assert_eq!(
            RiffError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RiffError::not_found("album", "a1").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RiffError::from(anyhow!("disk on fire")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(
            RiffError::not_found("review", "r9").to_string(),
            "review not found: r9"
        );
    }

    #[test]
    fn ids_are_trimmed_and_required() {
        assert_eq!(require_id("  a1 ", "albumId").unwrap(), "a1");
        assert!(matches!(
            require_id("   ", "albumId"),
            Err(RiffError::Validation(message)) if message == "albumId is required"
        ));
    }

    #[tokio::test]
    async fn internal_error_body_carries_cause() {
        let response = RiffError::from(anyhow!("disk on fire")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "disk on fire");
    }

    #[tokio::test]
    async fn validation_error_body_has_no_cause() {
        let response = RiffError::validation("Rating must be between 0 and 5").into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Rating must be between 0 and 5");
        assert!(body.get("error").is_none());
    }
}
