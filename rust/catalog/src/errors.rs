use duelist_engine::errors::ErrorKind;
use thiserror::Error;

/// Failure of a single request to the remote catalog.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FetchError {
    #[error("Catalog request timed out: {0}")]
    Timeout(String),
    #[error("Cannot reach catalog: {0}")]
    Connect(String),
    #[error("Catalog answered HTTP {status}")]
    Http { status: u16 },
    #[error("Malformed catalog response: {0}")]
    Payload(String),
}

impl FetchError {
    /// Network-level failures: nothing was received from the catalog.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetchError::Timeout(_) | FetchError::Connect(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CatalogError {
    #[error("Card source unavailable after {attempts} attempts: {last}")]
    SourceUnavailable { attempts: u32, last: String },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
        }
    }
}
