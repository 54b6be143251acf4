//! Error types for the recipe box
//!
//! Every failure is fatal to the handler that hit it. Nothing here retries.

use thiserror::Error;

/// Errors raised by storage, rendering, and page wiring
#[derive(Error, Debug)]
pub enum Error {
    /// Stored text under the slot is not a record list
    #[error("stored value under '{key}' is not a record list: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Record list could not be encoded
    #[error("failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Storage rejected a write because it is full
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// Any other storage backend failure
    #[error("storage error: {0}")]
    Storage(String),

    /// A required page element is not present
    #[error("missing page element '{selector}'")]
    MissingElement { selector: String },

    /// Creating or attaching a card failed
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
