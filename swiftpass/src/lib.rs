//! SwiftPass Booking Core
//!
//! A multi-step event-ticket booking flow modeled as an explicit state
//! machine: select a ticket tier and quantity, fill attendee details (with a
//! profile photo pushed to a hosted image service), and reach a confirmed
//! ticket with a downloadable artifact model.
//!
//! # Architecture
//!
//! The flow follows the reducer pattern: state is owned data, every input is
//! an action, and all business logic lives in a pure reducer that returns
//! side effects as values. The [`Store`] runtime executes those effects and
//! feeds resulting actions back in.
//!
//! ```text
//! ┌────────────┐  SelectTier / SetQuantity
//! │  Step 1    │  ContinueToDetails (needs stock)
//! │  Selecting ├────────────────────────────────┐
//! └────▲───────┘                                ▼
//!      │ GoBack                          ┌────────────┐
//!      └─────────────────────────────────┤  Step 2    │
//!                                        │  Details   │ AttachPhoto /
//!      ┌─────────────────────────────────┤            │ SetPhotoUrl /
//!      │ SubmitDetails (validated,       └────────────┘ SubmitDetails
//!      │  decrements availability)
//!      ▼
//! ┌────────────┐  BookAnother (availability untouched)
//! │  Step 3    ├──────────────────────────────► Step 1
//! │  Confirmed │
//! └────────────┘
//! ```
//!
//! External collaborators (the image host and the local store) are injected
//! via [`BookingEnvironment`]; production implementations live in
//! [`upload`] and [`persistence`], in-memory ones in [`mocks`].
//!
//! # Example
//!
//! ```
//! use swiftpass::{
//!     BookingAction, BookingEnvironment, BookingReducer, BookingState, Store,
//!     mocks::{MemoryLocalStore, StubImageHost, test_clock},
//!     types::{TierCatalog, TierId},
//! };
//!
//! # async fn example() {
//! let env = BookingEnvironment::new(
//!     test_clock(),
//!     MemoryLocalStore::new(),
//!     StubImageHost::succeeding("https://res.cloudinary.com/demo/image/upload/v1/me.png"),
//! );
//! let store = Store::new(
//!     BookingState::new(TierCatalog::seed()),
//!     BookingReducer::default(),
//!     env,
//! );
//!
//! store
//!     .send(BookingAction::SelectTier {
//!         tier: TierId::new("VIP"),
//!     })
//!     .await;
//! store.send(BookingAction::ContinueToDetails).await;
//! assert_eq!(store.state(BookingState::step).await, 2);
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod environment;
pub mod error;
pub mod mocks;
pub mod persistence;
pub mod providers;
pub mod reducer;
pub mod state;
pub mod store;
pub mod ticket;
pub mod types;
pub mod upload;
pub mod validation;

pub use self::actions::BookingAction;
pub use self::config::Config;
pub use self::core::environment::{Clock, SystemClock};
pub use self::core::effect::Effect;
pub use self::core::reducer::Reducer;
pub use self::environment::BookingEnvironment;
pub use self::error::{BookingError, Result};
pub use self::persistence::JsonFileStore;
pub use self::providers::{ImageHost, LocalStore};
pub use self::reducer::BookingReducer;
pub use self::state::{BookingPhase, BookingState, UploadStatus};
pub use self::store::Store;
pub use self::ticket::TicketArtifact;
pub use self::upload::CloudinaryClient;
