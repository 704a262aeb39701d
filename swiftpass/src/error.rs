//! Error types for the booking flow.

use crate::types::TierId;
use thiserror::Error;

/// Result type alias for booking operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Failure modes of the booking flow, organized by collaborator.
///
/// Field-level validation problems are not errors: they travel as
/// [`crate::types::FormErrors`] data so the UI can render them inline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// No tier with this identifier exists in the catalog.
    #[error("Unknown ticket tier: {0}")]
    TierNotFound(TierId),

    /// The tier exists but has no remaining stock.
    #[error("Ticket tier is sold out: {0}")]
    TierSoldOut(TierId),

    /// The file was rejected before any network I/O (e.g. non-image MIME).
    #[error("Upload rejected: {reason}")]
    UploadRejected {
        /// Why the file was not sent to the image host
        reason: String,
    },

    /// The image host returned a failure or could not be reached.
    #[error("Upload failed: {message}")]
    UploadFailed {
        /// Transport or host-reported detail
        message: String,
    },

    /// The local persistence adapter failed.
    ///
    /// Callers log this and continue; persistence is a cache, not a source
    /// of truth.
    #[error("Storage operation failed: {message}")]
    StorageFailed {
        /// Underlying I/O or serialization detail
        message: String,
    },
}
