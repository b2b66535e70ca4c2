use thiserror::Error;

/// Failures while moving a document in or out of its file format
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Could not read pages file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Could not serialize pages: {0}")]
    Serialize(#[source] serde_json::Error),
}
