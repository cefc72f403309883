use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::CartStorage`] adapters.
///
/// The store itself never returns these; it logs them and keeps the
/// in-memory cart.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cart storage at {path} is not a valid cart document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}
