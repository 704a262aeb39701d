//! Actions for the booking wizard (commands and events).

use crate::types::{TierCatalog, TierId, UserInfo};
use serde::{Deserialize, Serialize};

/// All inputs the booking reducer processes.
///
/// Commands are requests from the UI layer; events are facts produced by
/// effects (upload completions, persistence results). Both flow through the
/// same reducer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BookingAction {
    // Commands
    /// Command: highlight a tier at step 1.
    ///
    /// Rejected for unknown or sold-out tiers; quantity is re-clamped to
    /// the new tier's availability.
    SelectTier {
        /// Tier to select
        tier: TierId,
    },

    /// Command: set the requested seat count at step 1.
    ///
    /// Clamped to `1..=available` of the selected tier; a no-op without a
    /// selection.
    SetQuantity {
        /// Requested number of seats
        quantity: u32,
    },

    /// Command: advance from tier selection to attendee details.
    ContinueToDetails,

    /// Command: return from attendee details to tier selection, parking the
    /// draft for when the user comes back.
    GoBack,

    /// Command: upload a profile photo file.
    ///
    /// Non-image MIME types are rejected before any network I/O. A second
    /// upload while one is pending supersedes it.
    AttachPhoto {
        /// Original file name
        file_name: String,
        /// MIME type reported for the file
        content_type: String,
        /// Raw file bytes
        bytes: Vec<u8>,
    },

    /// Command: use a directly entered image URL instead of uploading.
    SetPhotoUrl {
        /// Candidate image URL
        url: String,
    },

    /// Command: submit the attendee form.
    ///
    /// Runs validation; on success decrements availability, persists the
    /// details, and moves to confirmation.
    SubmitDetails {
        /// Attendee full name
        name: String,
        /// Attendee email
        email: String,
        /// Free-text special request
        special_request: String,
    },

    /// Command: reset from confirmation back to tier selection, clearing
    /// attendee data. Availability is untouched.
    BookAnother,

    /// Command: restore the saved draft and cached catalog at startup.
    RestoreSaved,

    // Events
    /// Event: the photo upload finished.
    PhotoUploaded {
        /// Generation the upload was started with
        seq: u64,
        /// Hosted URL returned by the image host
        url: String,
    },

    /// Event: the photo upload failed.
    PhotoUploadFailed {
        /// Generation the upload was started with
        seq: u64,
        /// Transport or host detail for the log
        message: String,
    },

    /// Event: attendee details were written to the local store.
    DetailsSaved,

    /// Event: a local persistence operation failed. Logged, never blocking.
    SaveFailed {
        /// Underlying detail
        message: String,
    },

    /// Event: the local store answered the draft lookup.
    SavedFormLoaded {
        /// Previously saved details, if a well-formed record existed
        saved: Option<UserInfo>,
    },

    /// Event: the local store answered the catalog lookup.
    CatalogLoaded {
        /// Previously cached catalog, if a well-formed record existed
        catalog: Option<TierCatalog>,
    },
}
