//! Error taxonomy for the synchronization layer.
//!
//! Failures propagate to the caller without retry or rollback; a parse
//! failure leaves the store partially populated. Two conditions are
//! deliberately NOT errors: an unmapped query parameter is skipped, and a
//! value that fails URI classification degrades to a plain literal.

use reqwest::StatusCode;

/// Errors surfaced by the loaders, the store facade, and the mapper.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{method} {url} failed: {error}")]
    Network {
        method: &'static str,
        url: String,
        error: String,
    },

    #[error("{method} {url} returned {status}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: StatusCode,
    },

    #[error("failed to parse RDF payload into graph <{graph}>: {error}")]
    Parse { graph: String, error: String },

    #[error("graph store failure: {error}")]
    Store { error: String },

    #[error("failed to serialize source graph: {error}")]
    Serialize { error: String },
}

impl SyncError {
    pub(crate) fn network(
        method: &'static str,
        url: impl Into<String>,
        error: reqwest::Error,
    ) -> Self {
        SyncError::Network {
            method,
            url: url.into(),
            error: error.to_string(),
        }
    }

    pub(crate) fn parse(graph: impl std::fmt::Display, error: impl std::fmt::Display) -> Self {
        SyncError::Parse {
            graph: graph.to_string(),
            error: error.to_string(),
        }
    }

    pub(crate) fn store(error: impl std::fmt::Display) -> Self {
        SyncError::Store {
            error: error.to_string(),
        }
    }

    pub(crate) fn serialize(error: impl std::fmt::Display) -> Self {
        SyncError::Serialize {
            error: error.to_string(),
        }
    }

    /// Coarse category, used for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            SyncError::Network { .. } => "network",
            SyncError::UnexpectedStatus { .. } => "http_status",
            SyncError::Parse { .. } => "parse",
            SyncError::Store { .. } => "store",
            SyncError::Serialize { .. } => "serialize",
        }
    }
}
