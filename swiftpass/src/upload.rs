//! Cloudinary-style image upload client.
//!
//! Wire contract: `POST` multipart (`file` part plus an `upload_preset`
//! field) to `{api_url}/{cloud_name}/image/upload`; success is a 2xx JSON
//! body carrying `secure_url`. Any non-2xx response is an upload failure.
//! There is no retry logic; the caller may resubmit.

use crate::config::UploadConfig;
use crate::error::{BookingError, Result};
use crate::providers::ImageHost;
use crate::validation;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::future::Future;

/// HTTP client for the hosted image-upload endpoint.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    client: Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryClient {
    /// Create a client for the configured cloud and preset.
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint(),
            upload_preset: config.upload_preset.clone(),
        }
    }

    /// The resolved upload endpoint (for logging and diagnostics).
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ImageHost for CloudinaryClient {
    fn upload(
        &self,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String>> + Send {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let preset = self.upload_preset.clone();

        async move {
            // MIME gate before any network I/O.
            if !validation::is_image_mime(&content_type) {
                return Err(BookingError::UploadRejected {
                    reason: format!("not an image MIME type: {content_type}"),
                });
            }

            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(&content_type)
                .map_err(|err| BookingError::UploadRejected {
                    reason: err.to_string(),
                })?;
            let form = Form::new()
                .part("file", part)
                .text("upload_preset", preset);

            let response = client
                .post(&endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(|err| BookingError::UploadFailed {
                    message: err.to_string(),
                })?;

            let status = response.status();
            if status.is_success() {
                let body: UploadResponse =
                    response
                        .json()
                        .await
                        .map_err(|err| BookingError::UploadFailed {
                            message: format!("malformed upload response: {err}"),
                        })?;
                Ok(body.secure_url)
            } else {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(%status, %body, "image host rejected upload");
                Err(BookingError::UploadFailed {
                    message: format!("image host returned {status}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;

    fn client() -> CloudinaryClient {
        CloudinaryClient::new(&UploadConfig {
            cloud_name: "demo".to_string(),
            upload_preset: "ml_default".to_string(),
            api_url: "https://api.cloudinary.com/v1_1".to_string(),
        })
    }

    #[test]
    fn endpoint_includes_cloud_name() {
        assert_eq!(
            client().endpoint(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[tokio::test]
    async fn non_image_mime_rejected_before_network() {
        let result = client()
            .upload(
                "resume.pdf".to_string(),
                "application/pdf".to_string(),
                vec![1, 2, 3],
            )
            .await;

        assert!(matches!(result, Err(BookingError::UploadRejected { .. })));
    }
}
