//! Error types for rect-client operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("gRPC status error: {0}")]
    Status(#[from] tonic::Status),

    #[error("invalid matrix: {0}")]
    InvalidMatrix(#[from] rect_finder::Error),

    #[error("alphabet size must be at least 1, got {0}")]
    InvalidAlphabet(i64),

    #[error("malformed matrix JSON: {0}")]
    Json(#[from] serde_json::Error),
}
