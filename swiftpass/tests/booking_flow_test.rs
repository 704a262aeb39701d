//! End-to-end booking flow tests through the store runtime.
//!
//! These drive the full action → reducer → effect → action loop with
//! in-memory collaborators, covering the scenarios a UI would exercise.
//!
//! Run with: `cargo test --test booking_flow_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use swiftpass::mocks::{MemoryLocalStore, StubImageHost, test_clock};
use swiftpass::types::{FormField, TierCatalog, TierId, UserInfo};
use swiftpass::{
    BookingAction, BookingEnvironment, BookingPhase, BookingReducer, BookingState, Store,
};

type TestStore = Store<
    BookingState,
    BookingAction,
    BookingEnvironment<swiftpass::mocks::FixedClock, MemoryLocalStore, StubImageHost>,
    BookingReducer<swiftpass::mocks::FixedClock, MemoryLocalStore, StubImageHost>,
>;

const HOSTED_URL: &str = "https://res.cloudinary.com/demo/image/upload/v1/me.png";

fn store_with(storage: MemoryLocalStore, images: StubImageHost) -> TestStore {
    let env = BookingEnvironment::new(test_clock(), storage, images);
    Store::new(
        BookingState::new(TierCatalog::seed()),
        BookingReducer::default(),
        env,
    )
}

fn default_store() -> TestStore {
    store_with(MemoryLocalStore::new(), StubImageHost::succeeding(HOSTED_URL))
}

async fn advance_to_details(store: &TestStore, tier: &str, quantity: u32) {
    store
        .send(BookingAction::SelectTier {
            tier: TierId::new(tier),
        })
        .await;
    store.send(BookingAction::SetQuantity { quantity }).await;
    store.send(BookingAction::ContinueToDetails).await;
    assert_eq!(store.state(BookingState::step).await, 2);
}

async fn submit_valid_details(store: &TestStore) {
    store
        .send(BookingAction::SubmitDetails {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            special_request: String::new(),
        })
        .await;
}

/// VIP (available=20), quantity=3, valid submission leaves availability at
/// 17 and the wizard on step 3.
#[tokio::test]
async fn vip_booking_happy_path() {
    let storage = MemoryLocalStore::new();
    let store = store_with(storage.clone(), StubImageHost::succeeding(HOSTED_URL));

    advance_to_details(&store, "VIP", 3).await;
    submit_valid_details(&store).await;

    assert_eq!(store.state(BookingState::step).await, 3);
    let vip_left = store
        .state(|s| s.catalog.get(&TierId::new("VIP")).map(|t| t.available))
        .await;
    assert_eq!(vip_left, Some(17));

    // Successful submission persisted the attendee details and the catalog.
    let saved = storage.saved_form().unwrap().expect("form saved");
    assert_eq!(saved.email, "ada@example.com");
    let cached = storage.saved_catalog().unwrap().expect("catalog cached");
    assert_eq!(
        cached.get(&TierId::new("VIP")).map(|t| t.available),
        Some(17)
    );
}

#[tokio::test]
async fn sold_out_tier_blocks_step_one_transition() {
    let store = default_store();

    // Drain VVIP completely through repeated bookings.
    for _ in 0..10 {
        advance_to_details(&store, "VVIP", 2).await;
        submit_valid_details(&store).await;
        assert_eq!(store.state(BookingState::step).await, 3);
        store.send(BookingAction::BookAnother).await;
    }
    let vvip_left = store
        .state(|s| s.catalog.get(&TierId::new("VVIP")).map(|t| t.available))
        .await;
    assert_eq!(vvip_left, Some(0));

    // Selection of the sold-out tier is rejected and 1→2 stays blocked.
    store
        .send(BookingAction::SelectTier {
            tier: TierId::new("VVIP"),
        })
        .await;
    store.send(BookingAction::ContinueToDetails).await;
    assert_eq!(store.state(BookingState::step).await, 1);
}

#[tokio::test]
async fn malformed_email_blocks_advance() {
    let store = default_store();
    advance_to_details(&store, "REGULAR", 1).await;

    store
        .send(BookingAction::SubmitDetails {
            name: "Ada".to_string(),
            email: "ada-at-example.com".to_string(),
            special_request: String::new(),
        })
        .await;

    assert_eq!(store.state(BookingState::step).await, 2);
    let has_email_error = store
        .state(|s| match &s.phase {
            BookingPhase::EnteringDetails { errors, .. } => {
                errors.message(FormField::Email).is_some()
            }
            _ => false,
        })
        .await;
    assert!(has_email_error);
}

#[tokio::test]
async fn uploaded_photo_lands_in_user_info() {
    let images = StubImageHost::succeeding(HOSTED_URL);
    let store = store_with(MemoryLocalStore::new(), images.clone());
    advance_to_details(&store, "VIP", 1).await;

    store
        .send(BookingAction::AttachPhoto {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0xFF, 0xD8],
        })
        .await;

    // send() drives the effect loop to quiescence, so the completion event
    // has already been folded in.
    let profile_image = store
        .state(|s| match &s.phase {
            BookingPhase::EnteringDetails { draft, .. } => draft.profile_image.clone(),
            _ => None,
        })
        .await;
    assert_eq!(profile_image.as_deref(), Some(HOSTED_URL));
    assert_eq!(images.uploaded_files().unwrap(), vec!["me.png".to_string()]);

    submit_valid_details(&store).await;
    let confirmed_image = store
        .state(|s| match &s.phase {
            BookingPhase::Confirmed { order } => order.attendee.profile_image.clone(),
            _ => None,
        })
        .await;
    assert_eq!(confirmed_image.as_deref(), Some(HOSTED_URL));
}

#[tokio::test]
async fn failed_upload_shows_field_error_and_blocks_submission() {
    let store = store_with(
        MemoryLocalStore::new(),
        StubImageHost::failing("host returned 500"),
    );
    advance_to_details(&store, "VIP", 1).await;

    store
        .send(BookingAction::AttachPhoto {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0xFF],
        })
        .await;

    let error = store
        .state(|s| match &s.phase {
            BookingPhase::EnteringDetails { errors, .. } => {
                errors.message(FormField::ProfileImage).map(str::to_string)
            }
            _ => None,
        })
        .await;
    assert_eq!(
        error.as_deref(),
        Some(swiftpass::validation::MSG_UPLOAD_FAILED)
    );

    submit_valid_details(&store).await;
    assert_eq!(store.state(BookingState::step).await, 2);
}

#[tokio::test]
async fn book_another_clears_attendee_data_but_not_availability() {
    let storage = MemoryLocalStore::new();
    let store = store_with(storage.clone(), StubImageHost::succeeding(HOSTED_URL));

    advance_to_details(&store, "VIP", 2).await;
    submit_valid_details(&store).await;
    assert!(storage.saved_form().unwrap().is_some());

    store.send(BookingAction::BookAnother).await;

    assert_eq!(store.state(BookingState::step).await, 1);
    let (selected, saved_draft) = store
        .state(|s| {
            let selected = match &s.phase {
                BookingPhase::SelectingTicket { selected, .. } => selected.clone(),
                _ => None,
            };
            (selected, s.saved_draft.clone())
        })
        .await;
    assert!(selected.is_none());
    assert!(saved_draft.is_none());
    // The cleared draft is gone from the local store as well.
    assert!(storage.saved_form().unwrap().is_none());

    let vip_left = store
        .state(|s| s.catalog.get(&TierId::new("VIP")).map(|t| t.available))
        .await;
    assert_eq!(vip_left, Some(18));
}

#[tokio::test]
async fn persistence_failure_never_blocks_booking() {
    let store = store_with(
        MemoryLocalStore::failing_writes(),
        StubImageHost::succeeding(HOSTED_URL),
    );

    advance_to_details(&store, "VIP", 1).await;
    submit_valid_details(&store).await;

    // Save failed (and was logged), but the booking went through on
    // in-memory state.
    assert_eq!(store.state(BookingState::step).await, 3);
    let vip_left = store
        .state(|s| s.catalog.get(&TierId::new("VIP")).map(|t| t.available))
        .await;
    assert_eq!(vip_left, Some(19));
}

#[tokio::test]
async fn saved_draft_restores_into_step_two() {
    let saved = UserInfo {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        special_request: "front row".to_string(),
        profile_image: Some(HOSTED_URL.to_string()),
    };
    let store = store_with(
        MemoryLocalStore::with_form(saved.clone()),
        StubImageHost::succeeding(HOSTED_URL),
    );

    store.send(BookingAction::RestoreSaved).await;
    advance_to_details(&store, "REGULAR", 1).await;

    let draft = store
        .state(|s| match &s.phase {
            BookingPhase::EnteringDetails { draft, .. } => Some(draft.clone()),
            _ => None,
        })
        .await;
    assert_eq!(draft, Some(saved));
}

#[tokio::test]
async fn cached_catalog_restores_availability() {
    let mut cached = TierCatalog::seed();
    cached.decrement(&TierId::new("VIP"), 7);

    let store = store_with(
        MemoryLocalStore::with_catalog(cached),
        StubImageHost::succeeding(HOSTED_URL),
    );
    store.send(BookingAction::RestoreSaved).await;

    let vip_left = store
        .state(|s| s.catalog.get(&TierId::new("VIP")).map(|t| t.available))
        .await;
    assert_eq!(vip_left, Some(13));
}
