use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

/// Errors produced while setting up or executing claimer transactions.
#[derive(Debug, Error)]
pub enum ClaimerError {
    /// Node connection, account derivation or contract binding failed.
    #[error("setup error: {0}")]
    Setup(String),

    /// A round-trip to the node failed or the node rejected the request.
    #[error("node communication error during {context}: {message}")]
    NodeCommunication {
        context: &'static str,
        message: String,
    },

    /// Malformed key or signer/chain mismatch.
    #[error("signing error: {0}")]
    Signing(String),

    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("{operation} gave up after {attempts} attempts, last error: {last}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        last: Box<ClaimerError>,
    },
}

impl ClaimerError {
    pub fn node(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::NodeCommunication {
            context,
            message: err.to_string(),
        }
    }

    /// Only node round-trips can succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NodeCommunication { .. })
    }
}

impl From<alloy::signers::Error> for ClaimerError {
    fn from(err: alloy::signers::Error) -> Self {
        Self::Signing(err.to_string())
    }
}

impl From<RpcError<TransportErrorKind>> for ClaimerError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        Self::node("rpc request", err)
    }
}

pub type Result<T> = std::result::Result<T, ClaimerError>;
