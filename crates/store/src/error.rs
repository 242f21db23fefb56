use thiserror::Error;

/// Store-level error.
///
/// Absent or malformed blobs are *not* errors; reads degrade to the empty
/// collection. Only backend IO and serialization failures surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
