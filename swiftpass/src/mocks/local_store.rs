//! In-memory local store for testing.

use crate::error::{BookingError, Result};
use crate::providers::LocalStore;
use crate::types::{TierCatalog, UserInfo};
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    form: Option<UserInfo>,
    catalog: Option<TierCatalog>,
    fail_writes: bool,
}

/// In-memory [`LocalStore`] with injectable write failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocalStore {
    inner: Arc<Mutex<Inner>>,
}

fn lock_failed() -> BookingError {
    BookingError::StorageFailed {
        message: "mutex lock failed".to_string(),
    }
}

impl MemoryLocalStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose writes all fail (persistence-degraded mode).
    #[must_use]
    pub fn failing_writes() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                fail_writes: true,
                ..Inner::default()
            })),
        }
    }

    /// Create a store pre-seeded with a saved attendee record.
    #[must_use]
    pub fn with_form(info: UserInfo) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                form: Some(info),
                ..Inner::default()
            })),
        }
    }

    /// Create a store pre-seeded with a cached catalog.
    #[must_use]
    pub fn with_catalog(catalog: TierCatalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                catalog: Some(catalog),
                ..Inner::default()
            })),
        }
    }

    /// The currently saved attendee record (for assertions).
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn saved_form(&self) -> Result<Option<UserInfo>> {
        Ok(self.inner.lock().map_err(|_| lock_failed())?.form.clone())
    }

    /// The currently cached catalog (for assertions).
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn saved_catalog(&self) -> Result<Option<TierCatalog>> {
        Ok(self
            .inner
            .lock()
            .map_err(|_| lock_failed())?
            .catalog
            .clone())
    }
}

impl LocalStore for MemoryLocalStore {
    fn save_form(&self, info: &UserInfo) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let info = info.clone();

        async move {
            let mut guard = inner.lock().map_err(|_| lock_failed())?;
            if guard.fail_writes {
                return Err(BookingError::StorageFailed {
                    message: "simulated write failure".to_string(),
                });
            }
            guard.form = Some(info);
            Ok(())
        }
    }

    fn load_form(&self) -> impl Future<Output = Result<Option<UserInfo>>> + Send {
        let inner = Arc::clone(&self.inner);
        async move { Ok(inner.lock().map_err(|_| lock_failed())?.form.clone()) }
    }

    fn clear_form(&self) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let mut guard = inner.lock().map_err(|_| lock_failed())?;
            if guard.fail_writes {
                return Err(BookingError::StorageFailed {
                    message: "simulated write failure".to_string(),
                });
            }
            guard.form = None;
            Ok(())
        }
    }

    fn save_catalog(&self, catalog: &TierCatalog) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let catalog = catalog.clone();

        async move {
            let mut guard = inner.lock().map_err(|_| lock_failed())?;
            if guard.fail_writes {
                return Err(BookingError::StorageFailed {
                    message: "simulated write failure".to_string(),
                });
            }
            guard.catalog = Some(catalog);
            Ok(())
        }
    }

    fn load_catalog(&self) -> impl Future<Output = Result<Option<TierCatalog>>> + Send {
        let inner = Arc::clone(&self.inner);
        async move { Ok(inner.lock().map_err(|_| lock_failed())?.catalog.clone()) }
    }
}
