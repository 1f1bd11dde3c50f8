//! Template store errors

/// Errors the external template store can report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The identity already has an enrollment
    #[error("Identity {0:?} is already enrolled")]
    DuplicateIdentity(String),

    /// The store could not be reached or rejected the operation
    #[error("Template store unavailable: {0}")]
    Unavailable(String),
}
