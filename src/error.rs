use thiserror::Error;

/// Errors raised while reading documents from the content repository
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    /// Document does not exist upstream
    #[error("Content not found: {0}")]
    NotFound(String),

    /// Video document exists but carries no `youtube:` key
    #[error("No video id in document: {0}")]
    MalformedContent(String),

    /// Transport failure or unexpected upstream status
    #[error("Upstream content error: {0}")]
    Upstream(String),
}

/// Errors raised by the flag record store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Network or non-success response from the store
    #[error("Record store error: {0}")]
    Upstream(String),

    /// Record id is unknown to the store
    #[error("Record not found: {0}")]
    RecordNotFound(i64),

    /// The store returned a different number of ids than rows submitted
    #[error("Record store returned {returned} ids for {submitted} rows")]
    IdCountMismatch { submitted: usize, returned: usize },

    /// Response body could not be decoded
    #[error("Record store response could not be decoded: {0}")]
    Decode(String),
}

/// Flag token verification failure.
///
/// Deliberately carries no detail: a malformed token, a wrong id and a
/// wrong signature are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("Invalid flag token")]
    Invalid,
}

/// Errors from the flag create/delete workflow
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Flag(#[from] FlagError),
}
