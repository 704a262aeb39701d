//! Core types for the booking flow.

use crate::error::{BookingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identifier for a ticket tier (`REGULAR`, `VIP`, `VVIP` in the default
/// catalog).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierId(String);

impl TierId {
    /// Create a tier identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named ticket category with price and stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    /// Tier identifier
    pub id: TierId,
    /// Display text (e.g. "VIP ACCESS")
    pub label: String,
    /// Price in whole USD; zero means free
    pub price_usd: u32,
    /// Initial stock for this tier
    pub total: u32,
    /// Remaining stock; decremented only on confirmed booking
    pub available: u32,
}

impl TicketTier {
    /// Create a tier with full availability.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, price_usd: u32, total: u32) -> Self {
        Self {
            id: TierId::new(id),
            label: label.into(),
            price_usd,
            total,
            available: total,
        }
    }

    /// Whether no stock remains.
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available == 0
    }
}

/// The tier list for the event.
///
/// Restored from the local store when a persisted copy parses and is
/// consistent, else seeded with the default catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCatalog {
    tiers: Vec<TicketTier>,
}

impl TierCatalog {
    /// Build a catalog from explicit tiers.
    #[must_use]
    pub const fn new(tiers: Vec<TicketTier>) -> Self {
        Self { tiers }
    }

    /// The default Techember Fest catalog: REGULAR (free), VIP ($50),
    /// VVIP ($150), 20 seats each.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(vec![
            TicketTier::new("REGULAR", "REGULAR ACCESS", 0, 20),
            TicketTier::new("VIP", "VIP ACCESS", 50, 20),
            TicketTier::new("VVIP", "VVIP ACCESS", 150, 20),
        ])
    }

    /// All tiers in display order.
    #[must_use]
    pub fn tiers(&self) -> &[TicketTier] {
        &self.tiers
    }

    /// Look up a tier by id.
    #[must_use]
    pub fn get(&self, id: &TierId) -> Option<&TicketTier> {
        self.tiers.iter().find(|tier| &tier.id == id)
    }

    /// Look up a tier that can currently be selected.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::TierNotFound`] for an unknown id and
    /// [`BookingError::TierSoldOut`] when no stock remains.
    pub fn try_select(&self, id: &TierId) -> Result<&TicketTier> {
        let tier = self
            .get(id)
            .ok_or_else(|| BookingError::TierNotFound(id.clone()))?;
        if tier.is_sold_out() {
            return Err(BookingError::TierSoldOut(id.clone()));
        }
        Ok(tier)
    }

    /// Take `quantity` seats from a tier on confirmed booking.
    ///
    /// Availability never goes below zero; a quantity exceeding the
    /// remaining stock is a caller bug and is clamped with a warning.
    pub fn decrement(&mut self, id: &TierId, quantity: u32) {
        if let Some(tier) = self.tiers.iter_mut().find(|tier| &tier.id == id) {
            if quantity > tier.available {
                tracing::warn!(
                    tier = %id,
                    quantity,
                    available = tier.available,
                    "booking quantity exceeds availability, clamping"
                );
            }
            tier.available = tier.available.saturating_sub(quantity);
        } else {
            tracing::warn!(tier = %id, "decrement on unknown tier ignored");
        }
    }

    /// Schema validation for a catalog restored from the local store.
    ///
    /// A persisted catalog must be non-empty and every tier must satisfy
    /// `available <= total`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.tiers.is_empty() && self.tiers.iter().all(|tier| tier.available <= tier.total)
    }
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::seed()
    }
}

/// Attendee details captured at step 2, persisted, displayed at step 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Attendee full name
    pub name: String,
    /// Attendee email address
    pub email: String,
    /// Free-text special request
    pub special_request: String,
    /// URL of the uploaded profile photo, if any
    pub profile_image: Option<String>,
}

/// A form field that validation can attach a message to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    /// Attendee name
    Name,
    /// Attendee email
    Email,
    /// Profile photo URL
    ProfileImage,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::ProfileImage => write!(f, "profile_image"),
        }
    }
}

/// Field → message map produced by a validation pass.
///
/// Empty means valid; any entry blocks the step 2 → 3 transition and is
/// shown next to the corresponding field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: BTreeMap<FormField, String>,
}

impl FormErrors {
    /// An empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Attach a message to a field, replacing any previous one.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    /// Drop the message for a field, if any.
    pub fn remove(&mut self, field: FormField) {
        self.entries.remove(&field);
    }

    /// The message for a field, if any.
    #[must_use]
    pub fn message(&self, field: FormField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// Whether the last validation pass found no problems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

/// Static details of the event being booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    /// Event name
    pub name: String,
    /// Venue line
    pub venue: String,
    /// Human-readable date and time line
    pub date_line: String,
}

impl EventDetails {
    /// The Techember Fest '25 fixture.
    #[must_use]
    pub fn techember_fest() -> Self {
        Self {
            name: "Techember Fest '25".to_string(),
            venue: "04 Rumens road, Ikoyi, Lagos".to_string(),
            date_line: "March 15, 2025 | 7:00 PM".to_string(),
        }
    }
}

impl Default for EventDetails {
    fn default() -> Self {
        Self::techember_fest()
    }
}

/// The outcome of a completed booking, displayed at step 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedOrder {
    /// Unique id for this ticket; feeds the QR payload
    pub ticket_id: Uuid,
    /// Snapshot of the booked tier at confirmation time
    pub tier: TicketTier,
    /// Number of seats booked
    pub quantity: u32,
    /// Attendee details as submitted
    pub attendee: UserInfo,
    /// When the booking was confirmed
    pub booked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_has_three_tiers_with_full_stock() {
        let catalog = TierCatalog::seed();
        assert_eq!(catalog.tiers().len(), 3);
        assert!(catalog.tiers().iter().all(|t| t.available == t.total));
        assert!(catalog.is_consistent());
    }

    #[test]
    fn try_select_rejects_unknown_and_sold_out() {
        let mut catalog = TierCatalog::seed();
        let vip = TierId::new("VIP");

        assert!(matches!(
            catalog.try_select(&TierId::new("BACKSTAGE")),
            Err(BookingError::TierNotFound(_))
        ));

        catalog.decrement(&vip, 20);
        assert!(matches!(
            catalog.try_select(&vip),
            Err(BookingError::TierSoldOut(_))
        ));
    }

    #[test]
    fn decrement_never_goes_negative() {
        let mut catalog = TierCatalog::seed();
        let vip = TierId::new("VIP");
        catalog.decrement(&vip, 25);
        assert_eq!(catalog.get(&vip).map(|t| t.available), Some(0));
        // Over-decremented catalog still passes the consistency check.
        assert!(catalog.is_consistent());
    }

    #[test]
    fn inconsistent_catalog_is_rejected() {
        let catalog = TierCatalog::new(vec![TicketTier {
            id: TierId::new("VIP"),
            label: "VIP ACCESS".to_string(),
            price_usd: 50,
            total: 20,
            available: 21,
        }]);
        assert!(!catalog.is_consistent());
        assert!(!TierCatalog::new(vec![]).is_consistent());
    }
}
