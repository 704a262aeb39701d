//! Stub image host for testing.

use crate::error::{BookingError, Result};
use crate::providers::ImageHost;
use crate::validation;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Image host that returns a canned response and records uploads.
#[derive(Debug, Clone)]
pub struct StubImageHost {
    response: Result<String>,
    uploads: Arc<Mutex<Vec<String>>>,
}

impl StubImageHost {
    /// Host whose uploads succeed with the given hosted URL.
    #[must_use]
    pub fn succeeding(url: impl Into<String>) -> Self {
        Self {
            response: Ok(url.into()),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Host whose uploads fail with the given message.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(BookingError::UploadFailed {
                message: message.into(),
            }),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// File names of the uploads that reached the host (for assertions).
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn uploaded_files(&self) -> Result<Vec<String>> {
        Ok(self
            .uploads
            .lock()
            .map_err(|_| BookingError::StorageFailed {
                message: "mutex lock failed".to_string(),
            })?
            .clone())
    }
}

impl ImageHost for StubImageHost {
    fn upload(
        &self,
        file_name: String,
        content_type: String,
        _bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String>> + Send {
        let response = self.response.clone();
        let uploads = Arc::clone(&self.uploads);

        async move {
            // Honor the collaborator contract even in tests.
            if !validation::is_image_mime(&content_type) {
                return Err(BookingError::UploadRejected {
                    reason: format!("not an image MIME type: {content_type}"),
                });
            }

            if let Ok(mut guard) = uploads.lock() {
                guard.push(file_name);
            }
            response
        }
    }
}
