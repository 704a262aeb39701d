//! Booking environment.
//!
//! Dependencies are injected into the reducer via this environment type;
//! different implementations are provided for production and testing.

use crate::core::environment::Clock;
use crate::providers::{ImageHost, LocalStore};

/// Environment dependencies for the booking reducer.
///
/// # Type Parameters
///
/// - `C`: clock (timestamps on confirmed orders)
/// - `S`: local persistence adapter
/// - `I`: image-upload collaborator
#[derive(Clone)]
pub struct BookingEnvironment<C, S, I>
where
    C: Clock + Clone,
    S: LocalStore + Clone,
    I: ImageHost + Clone,
{
    /// Clock for booking timestamps.
    pub clock: C,

    /// Best-effort local persistence.
    pub storage: S,

    /// Image host for profile photos.
    pub images: I,
}

impl<C, S, I> BookingEnvironment<C, S, I>
where
    C: Clock + Clone,
    S: LocalStore + Clone,
    I: ImageHost + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub const fn new(clock: C, storage: S, images: I) -> Self {
        Self {
            clock,
            storage,
            images,
        }
    }
}
