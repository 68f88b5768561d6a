//! Error types

use thiserror::Error;

/// Failure opening a link destination.
///
/// Produced by [`LinkOpener`](crate::viewport::LinkOpener) implementations and
/// reported back to the caller as a failed interaction. A failed open never
/// aborts a paint pass or panics the viewport.
#[derive(Debug, Error)]
pub enum OpenError {
    /// No entry, file, or URL matched the destination.
    #[error("no target found for `{0}`")]
    Unresolved(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The system handler rejected the destination.
    #[error("{0}")]
    External(String),
}
