use thiserror::Error;

/// Why a search produced no usable list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The request could not complete (connection, TLS, non-2xx status).
    #[error("catalog request failed: {0}")]
    Network(String),
    /// The response body was not the expected JSON shape.
    #[error("catalog response could not be parsed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
