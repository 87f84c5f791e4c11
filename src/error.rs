use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Failures of the in-memory ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("chain is empty: genesis block has not been created")]
    EmptyChain,
}

/// A bounded proof-of-work search that stopped without a solution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PowError {
    #[error("proof search cancelled after {attempts} attempts")]
    Cancelled { attempts: u64 },
    #[error("no proof found within {attempts} attempts")]
    Exhausted { attempts: u64 },
}

/// Why a peer did not contribute a chain during conflict resolution.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("request to {peer} failed: {source}")]
    Http {
        peer: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("peer {peer} answered with status {status}")]
    Status { peer: String, status: u16 },
    #[error("peer {peer} reported length {reported} but sent {actual} blocks")]
    LengthMismatch {
        peer: String,
        reported: usize,
        actual: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    #[error("invalid node address: {0:?}")]
    InvalidAddress(String),
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("chain tip moved while mining; block discarded")]
    StaleTip,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Pow(#[from] PowError),
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) | ApiError::Node(_) => "VALIDATION_ERROR",
            ApiError::StaleTip => "STALE_TIP",
            ApiError::Ledger(_) => "LEDGER_ERROR",
            ApiError::Pow(_) => "MINING_ABORTED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Node(_) => StatusCode::BAD_REQUEST,
            ApiError::StaleTip => StatusCode::CONFLICT,
            ApiError::Pow(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Ledger(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}
