//! Reducer for the booking wizard.
//!
//! Owns every transition rule of the three-step flow:
//!
//! 1. Tier selection gates on stock (`available > 0`) and clamps quantity.
//! 2. Attendee details gate on validation and on the photo upload having
//!    settled; a confirmed submission decrements availability and persists
//!    the details.
//! 3. Confirmation offers only the reset edge back to step 1.
//!
//! Invalid transitions fall through without touching state or producing
//! effects.

use crate::actions::BookingAction;
use crate::core::effect::Effect;
use crate::core::environment::Clock;
use crate::core::reducer::Reducer;
use crate::environment::BookingEnvironment;
use crate::providers::{ImageHost, LocalStore};
use crate::state::{BookingPhase, BookingState, UploadStatus};
use crate::types::{ConfirmedOrder, FormErrors, FormField, TierCatalog, TierId, UserInfo};
use crate::validation;
use std::marker::PhantomData;
use uuid::Uuid;

/// Reducer driving the booking wizard.
pub struct BookingReducer<C, S, I>
where
    C: Clock + Clone,
    S: LocalStore + Clone,
    I: ImageHost + Clone,
{
    _phantom: PhantomData<(C, S, I)>,
}

impl<C, S, I> Default for BookingReducer<C, S, I>
where
    C: Clock + Clone,
    S: LocalStore + Clone,
    I: ImageHost + Clone,
{
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<C, S, I> Reducer for BookingReducer<C, S, I>
where
    C: Clock + Clone,
    S: LocalStore + Clone + 'static,
    I: ImageHost + Clone + 'static,
{
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment<C, S, I>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Vec<Effect<Self::Action>> {
        match action {
            BookingAction::SelectTier { tier } => Self::select_tier(state, &tier),
            BookingAction::SetQuantity { quantity } => Self::set_quantity(state, quantity),
            BookingAction::ContinueToDetails => Self::continue_to_details(state),
            BookingAction::GoBack => Self::go_back(state),
            BookingAction::AttachPhoto {
                file_name,
                content_type,
                bytes,
            } => Self::attach_photo(state, env, file_name, content_type, bytes),
            BookingAction::SetPhotoUrl { url } => Self::set_photo_url(state, url),
            BookingAction::SubmitDetails {
                name,
                email,
                special_request,
            } => Self::submit_details(state, env, name, email, special_request),
            BookingAction::BookAnother => Self::book_another(state, env),
            BookingAction::RestoreSaved => Self::restore_saved(env),
            BookingAction::PhotoUploaded { seq, url } => Self::photo_uploaded(state, seq, url),
            BookingAction::PhotoUploadFailed { seq, message } => {
                Self::photo_upload_failed(state, seq, &message)
            }
            BookingAction::DetailsSaved => {
                tracing::debug!("attendee details persisted");
                vec![Effect::None]
            }
            BookingAction::SaveFailed { message } => {
                // Persistence is a cache: log and carry on.
                tracing::warn!(%message, "local persistence failed");
                vec![Effect::None]
            }
            BookingAction::SavedFormLoaded { saved } => Self::saved_form_loaded(state, saved),
            BookingAction::CatalogLoaded { catalog } => Self::catalog_loaded(state, catalog),
        }
    }
}

impl<C, S, I> BookingReducer<C, S, I>
where
    C: Clock + Clone,
    S: LocalStore + Clone + 'static,
    I: ImageHost + Clone + 'static,
{
    fn select_tier(state: &mut BookingState, tier: &TierId) -> Vec<Effect<BookingAction>> {
        let BookingPhase::SelectingTicket { selected, quantity } = &mut state.phase else {
            return vec![Effect::None];
        };

        match state.catalog.try_select(tier) {
            Ok(info) => {
                // Previous quantity may exceed the new tier's stock.
                *quantity = (*quantity).clamp(1, info.available);
                *selected = Some(tier.clone());
            }
            Err(err) => tracing::debug!(%err, "tier selection rejected"),
        }
        vec![Effect::None]
    }

    fn set_quantity(state: &mut BookingState, requested: u32) -> Vec<Effect<BookingAction>> {
        let BookingPhase::SelectingTicket {
            selected: Some(id),
            quantity,
        } = &mut state.phase
        else {
            return vec![Effect::None];
        };

        if let Ok(info) = state.catalog.try_select(id) {
            *quantity = requested.clamp(1, info.available);
        }
        vec![Effect::None]
    }

    fn continue_to_details(state: &mut BookingState) -> Vec<Effect<BookingAction>> {
        let BookingPhase::SelectingTicket {
            selected: Some(id),
            quantity,
        } = state.phase.clone()
        else {
            return vec![Effect::None];
        };

        match state.catalog.try_select(&id) {
            Ok(info) => {
                let quantity = quantity.clamp(1, info.available);
                let draft = state.saved_draft.clone().unwrap_or_default();
                state.phase = BookingPhase::EnteringDetails {
                    tier: id,
                    quantity,
                    draft,
                    errors: FormErrors::new(),
                    upload: UploadStatus::Idle,
                };
            }
            Err(err) => tracing::debug!(%err, "cannot continue to attendee details"),
        }
        vec![Effect::None]
    }

    fn go_back(state: &mut BookingState) -> Vec<Effect<BookingAction>> {
        let BookingPhase::EnteringDetails {
            tier,
            quantity,
            draft,
            ..
        } = state.phase.clone()
        else {
            return vec![Effect::None];
        };

        // Park the draft so returning to step 2 restores it.
        state.saved_draft = Some(draft);
        state.phase = BookingPhase::SelectingTicket {
            selected: Some(tier),
            quantity,
        };
        vec![Effect::None]
    }

    fn attach_photo(
        state: &mut BookingState,
        env: &BookingEnvironment<C, S, I>,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    ) -> Vec<Effect<BookingAction>> {
        if !matches!(state.phase, BookingPhase::EnteringDetails { .. }) {
            return vec![Effect::None];
        }

        if !validation::is_image_mime(&content_type) {
            if let BookingPhase::EnteringDetails { errors, upload, .. } = &mut state.phase {
                errors.insert(FormField::ProfileImage, validation::MSG_NOT_AN_IMAGE);
                *upload = UploadStatus::Failed {
                    message: format!("unsupported MIME type: {content_type}"),
                };
            }
            return vec![Effect::None];
        }

        let seq = state.next_upload_seq();
        if let BookingPhase::EnteringDetails { errors, upload, .. } = &mut state.phase {
            *upload = UploadStatus::Uploading { seq };
            errors.remove(FormField::ProfileImage);
        }

        let images = env.images.clone();
        vec![Effect::future(async move {
            match images.upload(file_name, content_type, bytes).await {
                Ok(url) => Some(BookingAction::PhotoUploaded { seq, url }),
                Err(err) => Some(BookingAction::PhotoUploadFailed {
                    seq,
                    message: err.to_string(),
                }),
            }
        })]
    }

    fn set_photo_url(state: &mut BookingState, url: String) -> Vec<Effect<BookingAction>> {
        let BookingPhase::EnteringDetails {
            draft,
            errors,
            upload,
            ..
        } = &mut state.phase
        else {
            return vec![Effect::None];
        };

        if validation::is_valid_image_url(&url) {
            draft.profile_image = Some(url);
            errors.remove(FormField::ProfileImage);
            *upload = UploadStatus::Idle;
        } else {
            errors.insert(FormField::ProfileImage, validation::MSG_INVALID_IMAGE_URL);
        }
        vec![Effect::None]
    }

    fn photo_uploaded(state: &mut BookingState, seq: u64, url: String) -> Vec<Effect<BookingAction>> {
        let BookingPhase::EnteringDetails {
            draft,
            errors,
            upload,
            ..
        } = &mut state.phase
        else {
            tracing::debug!(seq, "upload completed outside the details step, dropping");
            return vec![Effect::None];
        };

        if *upload != (UploadStatus::Uploading { seq }) {
            // A newer upload superseded this one; only the latest matters.
            tracing::debug!(seq, "stale upload completion ignored");
            return vec![Effect::None];
        }

        draft.profile_image = Some(url);
        *upload = UploadStatus::Idle;
        errors.remove(FormField::ProfileImage);
        vec![Effect::None]
    }

    fn photo_upload_failed(
        state: &mut BookingState,
        seq: u64,
        message: &str,
    ) -> Vec<Effect<BookingAction>> {
        let BookingPhase::EnteringDetails { errors, upload, .. } = &mut state.phase else {
            return vec![Effect::None];
        };

        if *upload != (UploadStatus::Uploading { seq }) {
            tracing::debug!(seq, "stale upload failure ignored");
            return vec![Effect::None];
        }

        tracing::warn!(%message, "photo upload failed");
        *upload = UploadStatus::Failed {
            message: message.to_string(),
        };
        errors.insert(FormField::ProfileImage, validation::MSG_UPLOAD_FAILED);
        vec![Effect::None]
    }

    fn submit_details(
        state: &mut BookingState,
        env: &BookingEnvironment<C, S, I>,
        name: String,
        email: String,
        special_request: String,
    ) -> Vec<Effect<BookingAction>> {
        let BookingPhase::EnteringDetails {
            tier,
            quantity,
            draft,
            errors,
            upload,
        } = &mut state.phase
        else {
            return vec![Effect::None];
        };

        // Submission is disabled while the upload collaborator has the
        // last word on the photo.
        match upload {
            UploadStatus::Uploading { .. } => {
                errors.insert(FormField::ProfileImage, validation::MSG_UPLOAD_IN_PROGRESS);
                return vec![Effect::None];
            }
            UploadStatus::Failed { .. } => {
                errors.insert(FormField::ProfileImage, validation::MSG_UPLOAD_FAILED);
                return vec![Effect::None];
            }
            UploadStatus::Idle => {}
        }

        let info = UserInfo {
            name,
            email,
            special_request,
            profile_image: draft.profile_image.clone(),
        };

        let validation_errors = validation::validate_details(&info);
        if !validation_errors.is_empty() {
            *draft = info;
            *errors = validation_errors;
            return vec![Effect::None];
        }

        let tier_id = tier.clone();
        let quantity = *quantity;

        state.catalog.decrement(&tier_id, quantity);
        let Some(tier_snapshot) = state.catalog.get(&tier_id).cloned() else {
            tracing::warn!(tier = %tier_id, "submitted tier missing from catalog");
            return vec![Effect::None];
        };

        let order = ConfirmedOrder {
            ticket_id: Uuid::new_v4(),
            tier: tier_snapshot,
            quantity,
            attendee: info.clone(),
            booked_at: env.clock.now(),
        };
        state.saved_draft = Some(info.clone());
        state.phase = BookingPhase::Confirmed { order };

        let catalog = state.catalog.clone();
        let storage = env.storage.clone();
        let save_form = Effect::future(async move {
            match storage.save_form(&info).await {
                Ok(()) => Some(BookingAction::DetailsSaved),
                Err(err) => Some(BookingAction::SaveFailed {
                    message: err.to_string(),
                }),
            }
        });
        let storage = env.storage.clone();
        let save_catalog = Effect::future(async move {
            match storage.save_catalog(&catalog).await {
                Ok(()) => None,
                Err(err) => Some(BookingAction::SaveFailed {
                    message: err.to_string(),
                }),
            }
        });
        vec![save_form, save_catalog]
    }

    fn book_another(
        state: &mut BookingState,
        env: &BookingEnvironment<C, S, I>,
    ) -> Vec<Effect<BookingAction>> {
        if !matches!(state.phase, BookingPhase::Confirmed { .. }) {
            return vec![Effect::None];
        }

        state.phase = BookingPhase::initial();
        state.saved_draft = None;

        // Also drop the cached record so a reload does not resurrect the
        // cleared draft.
        let storage = env.storage.clone();
        vec![Effect::future(async move {
            match storage.clear_form().await {
                Ok(()) => None,
                Err(err) => Some(BookingAction::SaveFailed {
                    message: err.to_string(),
                }),
            }
        })]
    }

    fn restore_saved(env: &BookingEnvironment<C, S, I>) -> Vec<Effect<BookingAction>> {
        let storage = env.storage.clone();
        let load_form = Effect::future(async move {
            match storage.load_form().await {
                Ok(saved) => Some(BookingAction::SavedFormLoaded { saved }),
                Err(err) => {
                    tracing::warn!(%err, "failed to read saved attendee details");
                    Some(BookingAction::SavedFormLoaded { saved: None })
                }
            }
        });

        let storage = env.storage.clone();
        let load_catalog = Effect::future(async move {
            match storage.load_catalog().await {
                Ok(catalog) => Some(BookingAction::CatalogLoaded { catalog }),
                Err(err) => {
                    tracing::warn!(%err, "failed to read cached tier catalog");
                    Some(BookingAction::CatalogLoaded { catalog: None })
                }
            }
        });

        vec![load_form, load_catalog]
    }

    fn saved_form_loaded(
        state: &mut BookingState,
        saved: Option<UserInfo>,
    ) -> Vec<Effect<BookingAction>> {
        if let Some(info) = saved {
            tracing::debug!("restored saved attendee details");
            state.saved_draft = Some(info);
        }
        vec![Effect::None]
    }

    fn catalog_loaded(
        state: &mut BookingState,
        catalog: Option<TierCatalog>,
    ) -> Vec<Effect<BookingAction>> {
        let Some(catalog) = catalog else {
            return vec![Effect::None];
        };
        if !catalog.is_consistent() {
            tracing::warn!("ignoring inconsistent cached tier catalog");
            return vec![Effect::None];
        }
        if matches!(
            state.phase,
            BookingPhase::SelectingTicket { selected: None, .. }
        ) {
            state.catalog = catalog;
        } else {
            tracing::debug!("catalog restore skipped, session already in progress");
        }
        vec![Effect::None]
    }
}
