//! JSON-file implementation of the local persistence adapter.
//!
//! Records are JSON documents under a data directory, one file per fixed
//! key: `current_form.json` for the attendee draft and `tier_catalog.json`
//! for the availability cache. A record that exists but does not parse is
//! treated as absent (the caller logs and reseeds); persistence never blocks
//! the booking flow.

use crate::error::{BookingError, Result};
use crate::providers::LocalStore;
use crate::types::{TierCatalog, UserInfo};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::PathBuf;

const FORM_KEY: &str = "current_form";
const CATALOG_KEY: &str = "tier_catalog";

/// File-backed key-value store for one booking session.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

async fn write_record<T>(path: PathBuf, value: T) -> Result<()>
where
    T: Serialize,
{
    let bytes = serde_json::to_vec_pretty(&value).map_err(|err| BookingError::StorageFailed {
        message: err.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| BookingError::StorageFailed {
                message: err.to_string(),
            })?;
    }

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|err| BookingError::StorageFailed {
            message: err.to_string(),
        })
}

async fn read_record<T>(path: PathBuf) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(BookingError::StorageFailed {
                message: err.to_string(),
            });
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            // Unexpected shape means "absent", per the stored-data contract.
            tracing::warn!(path = %path.display(), %err, "malformed record treated as absent");
            Ok(None)
        }
    }
}

async fn remove_record(path: PathBuf) -> Result<()> {
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(BookingError::StorageFailed {
            message: err.to_string(),
        }),
    }
}

impl LocalStore for JsonFileStore {
    fn save_form(&self, info: &UserInfo) -> impl Future<Output = Result<()>> + Send {
        write_record(self.record_path(FORM_KEY), info.clone())
    }

    fn load_form(&self) -> impl Future<Output = Result<Option<UserInfo>>> + Send {
        read_record(self.record_path(FORM_KEY))
    }

    fn clear_form(&self) -> impl Future<Output = Result<()>> + Send {
        remove_record(self.record_path(FORM_KEY))
    }

    fn save_catalog(&self, catalog: &TierCatalog) -> impl Future<Output = Result<()>> + Send {
        write_record(self.record_path(CATALOG_KEY), catalog.clone())
    }

    fn load_catalog(&self) -> impl Future<Output = Result<Option<TierCatalog>>> + Send {
        read_record(self.record_path(CATALOG_KEY))
    }
}
