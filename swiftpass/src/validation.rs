//! Attendee form validation.
//!
//! Pure checks over submitted field values. Results travel as
//! [`FormErrors`] data so the UI can render them inline; an empty map means
//! the step 2 → 3 transition may proceed.

use crate::types::{FormField, FormErrors, UserInfo};
use regex::Regex;
use std::sync::LazyLock;

/// Host that uploaded photos land on; URLs from it are always accepted.
pub const UPLOAD_HOST: &str = "res.cloudinary.com";

/// Message for a missing name.
pub const MSG_NAME_REQUIRED: &str = "Name is required";
/// Message for a malformed email.
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
/// Message for a photo URL that is neither hosted nor a direct image link.
pub const MSG_INVALID_IMAGE_URL: &str = "Please provide a valid image URL";
/// Message shown when the upload collaborator reported failure.
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload image. Please try again.";
/// Message shown when submitting while an upload is still in flight.
pub const MSG_UPLOAD_IN_PROGRESS: &str = "Photo upload in progress, please wait";
/// Message for a file whose MIME type is not an image.
pub const MSG_NOT_AN_IMAGE: &str = "Only image files can be uploaded";

#[allow(clippy::expect_used)] // hardcoded patterns always compile
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email pattern compiles")
});

#[allow(clippy::expect_used)] // hardcoded patterns always compile
static IMAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|webp|gif)$")
        .expect("hardcoded image URL pattern compiles")
});

/// Whether an email has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether a URL is acceptable as a profile photo: either served by the
/// upload host or a direct link to an image file.
#[must_use]
pub fn is_valid_image_url(url: &str) -> bool {
    url.strip_prefix("https://")
        .is_some_and(|rest| rest.starts_with(UPLOAD_HOST))
        || IMAGE_URL_RE.is_match(url)
}

/// Whether a MIME type names an image; gates the upload collaborator.
#[must_use]
pub fn is_image_mime(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Validate submitted attendee details.
///
/// Recomputed from scratch on every pass: name required, email must parse,
/// and a photo (when present) must be a valid image URL.
#[must_use]
pub fn validate_details(info: &UserInfo) -> FormErrors {
    let mut errors = FormErrors::new();

    if info.name.trim().is_empty() {
        errors.insert(FormField::Name, MSG_NAME_REQUIRED);
    }
    if !is_valid_email(&info.email) {
        errors.insert(FormField::Email, MSG_INVALID_EMAIL);
    }
    if let Some(url) = &info.profile_image {
        if !is_valid_image_url(url) {
            errors.insert(FormField::ProfileImage, MSG_INVALID_IMAGE_URL);
        }
    }

    errors
}
