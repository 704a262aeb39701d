//! Capability traits injected into the booking environment.
//!
//! External collaborators are abstracted behind traits so production,
//! testing, and future UI hosts can supply their own implementations.

use crate::error::Result;
use crate::types::{TierCatalog, UserInfo};
use std::future::Future;

/// Best-effort local persistence for the booking session.
///
/// Records live under fixed keys (one session at a time); a record that
/// fails to deserialize is reported as absent, not as an error. Failures
/// are logged by the caller and never block the flow.
pub trait LocalStore: Send + Sync {
    /// Persist the submitted attendee details.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::StorageFailed`] when the record
    /// cannot be written.
    fn save_form(&self, info: &UserInfo) -> impl Future<Output = Result<()>> + Send;

    /// Load previously saved attendee details.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::StorageFailed`] when the store
    /// cannot be read at all; a missing or malformed record is `Ok(None)`.
    fn load_form(&self) -> impl Future<Output = Result<Option<UserInfo>>> + Send;

    /// Remove the saved attendee details.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::StorageFailed`] when the record
    /// exists but cannot be removed.
    fn clear_form(&self) -> impl Future<Output = Result<()>> + Send;

    /// Cache the tier catalog (availability survives reloads).
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::StorageFailed`] when the record
    /// cannot be written.
    fn save_catalog(&self, catalog: &TierCatalog) -> impl Future<Output = Result<()>> + Send;

    /// Load the cached tier catalog.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::StorageFailed`] when the store
    /// cannot be read at all; a missing or malformed record is `Ok(None)`.
    fn load_catalog(&self) -> impl Future<Output = Result<Option<TierCatalog>>> + Send;
}

/// The image-upload collaborator.
///
/// Accepts one file and returns a hosted URL, or fails with a message the
/// caller can log. No retry logic: the user may resubmit, and a newer
/// upload supersedes an in-flight one at the state layer.
pub trait ImageHost: Send + Sync {
    /// Upload one image file and return its hosted URL.
    ///
    /// Implementations must reject non-image MIME types before attempting
    /// any network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BookingError::UploadRejected`] for files that
    /// never leave the machine and
    /// [`crate::error::BookingError::UploadFailed`] for transport or host
    /// failures (any non-2xx response).
    fn upload(
        &self,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String>> + Send;
}
