use super::store::StoreError;

/// Failures surfaced by the query and vote paths.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// Missing or not yet published. Callers cannot tell the two apart.
    #[error("question not found")]
    NotFound,
    #[error("choice does not belong to this question")]
    InvalidChoice,
    #[error(transparent)]
    Store(#[from] StoreError),
}
