//! Session state for the booking wizard.

use crate::types::{ConfirmedOrder, EventDetails, FormErrors, TierCatalog, TierId, UserInfo};

/// Progress of the profile-photo upload at step 2.
///
/// `seq` is a session-wide generation counter: every new upload bumps it,
/// and a completion carrying a stale `seq` is dropped. The latest upload
/// always wins; nothing is cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadStatus {
    /// No upload pending
    #[default]
    Idle,
    /// Upload in flight; submission is refused until it resolves
    Uploading {
        /// Generation this upload belongs to
        seq: u64,
    },
    /// The most recent upload failed; submission is refused until retried
    Failed {
        /// Host- or transport-reported detail (the form shows a generic
        /// message, this one goes to the log)
        message: String,
    },
}

/// The wizard state machine.
///
/// `TicketSelection(1) → AttendeeDetails(2) → Confirmation(3)`, plus the
/// reset edge from 3 back to 1 and a back edge from 2 to 1.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingPhase {
    /// Step 1: choosing a tier and quantity
    SelectingTicket {
        /// Currently highlighted tier, if any
        selected: Option<TierId>,
        /// Requested number of seats (clamped to availability)
        quantity: u32,
    },
    /// Step 2: entering attendee details
    EnteringDetails {
        /// Tier carried over from step 1
        tier: TierId,
        /// Quantity carried over from step 1
        quantity: u32,
        /// Working copy of the attendee details
        draft: UserInfo,
        /// Result of the last validation pass
        errors: FormErrors,
        /// Profile-photo upload progress
        upload: UploadStatus,
    },
    /// Step 3: booking confirmed
    Confirmed {
        /// The completed booking
        order: ConfirmedOrder,
    },
}

impl BookingPhase {
    /// The initial phase: nothing selected, quantity 1.
    #[must_use]
    pub const fn initial() -> Self {
        Self::SelectingTicket {
            selected: None,
            quantity: 1,
        }
    }

    /// Step number shown by the wizard (1..=3).
    #[must_use]
    pub const fn step(&self) -> u8 {
        match self {
            Self::SelectingTicket { .. } => 1,
            Self::EnteringDetails { .. } => 2,
            Self::Confirmed { .. } => 3,
        }
    }
}

impl Default for BookingPhase {
    fn default() -> Self {
        Self::initial()
    }
}

/// All state owned by one booking session.
///
/// The catalog lives beside the phase machine so availability survives
/// "book another" resets; the saved draft is the bridge between the local
/// store and step 2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingState {
    /// Tier catalog with live availability
    pub catalog: TierCatalog,
    /// Current wizard phase
    pub phase: BookingPhase,
    /// Attendee details restored from the local store or parked by the
    /// back edge; seeds the step 2 draft
    pub saved_draft: Option<UserInfo>,
    /// Event fixture rendered on the ticket
    pub event: EventDetails,
    upload_seq: u64,
}

impl BookingState {
    /// Create a session over the given catalog, at step 1.
    #[must_use]
    pub fn new(catalog: TierCatalog) -> Self {
        Self {
            catalog,
            phase: BookingPhase::initial(),
            saved_draft: None,
            event: EventDetails::techember_fest(),
            upload_seq: 0,
        }
    }

    /// Current wizard step (1..=3).
    #[must_use]
    pub const fn step(&self) -> u8 {
        self.phase.step()
    }

    /// Whether a photo upload is currently in flight.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        matches!(
            self.phase,
            BookingPhase::EnteringDetails {
                upload: UploadStatus::Uploading { .. },
                ..
            }
        )
    }

    /// Bump and return the upload generation counter.
    pub const fn next_upload_seq(&mut self) -> u64 {
        self.upload_seq += 1;
        self.upload_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_phase_is_step_one() {
        let state = BookingState::new(TierCatalog::seed());
        assert_eq!(state.step(), 1);
        assert!(!state.is_uploading());
    }

    #[test]
    fn upload_seq_is_monotonic() {
        let mut state = BookingState::new(TierCatalog::seed());
        let first = state.next_upload_seq();
        let second = state.next_upload_seq();
        assert!(second > first);
    }
}
