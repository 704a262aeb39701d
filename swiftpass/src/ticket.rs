//! Ticket render model.
//!
//! The visual renderer (and the image export it feeds) is an external
//! collaborator; this module owns the data handed to it: what goes on the
//! ticket, the QR payload, and the download filename.

use crate::types::{ConfirmedOrder, EventDetails, UserInfo};
use serde::{Deserialize, Serialize};

/// Base URL encoded into ticket QR codes.
pub const TICKET_BASE_URL: &str = "https://techember-fest.com/ticket";

const DEFAULT_FILE_NAME: &str = "techember-ticket.png";

/// Everything an external renderer needs to draw and export one ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketArtifact {
    /// Event shown in the ticket header
    pub event: EventDetails,
    /// Attendee details as submitted
    pub holder: UserInfo,
    /// Display label of the booked tier
    pub tier_label: String,
    /// Number of seats booked
    pub quantity: u32,
    /// Value to encode in the QR/barcode
    pub qr_payload: String,
    /// Filename for the exported image
    pub file_name: String,
}

impl TicketArtifact {
    /// Build the render model for a confirmed order.
    #[must_use]
    pub fn from_order(event: &EventDetails, order: &ConfirmedOrder) -> Self {
        Self {
            event: event.clone(),
            holder: order.attendee.clone(),
            tier_label: order.tier.label.clone(),
            quantity: order.quantity,
            qr_payload: format!("{TICKET_BASE_URL}/{}", order.ticket_id),
            file_name: download_file_name(&order.attendee.name),
        }
    }
}

/// Filename for the exported ticket image: `techember-ticket.png`, or a
/// name-suffixed variant when the holder name yields a usable slug.
#[must_use]
pub fn download_file_name(holder_name: &str) -> String {
    let slug: String = holder_name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("techember-ticket-{slug}.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TicketTier, TierCatalog, TierId};
    use chrono::Utc;
    use uuid::Uuid;

    fn order() -> ConfirmedOrder {
        let catalog = TierCatalog::seed();
        let tier: TicketTier = catalog
            .get(&TierId::new("VIP"))
            .cloned()
            .unwrap_or_else(|| TicketTier::new("VIP", "VIP ACCESS", 50, 20));
        ConfirmedOrder {
            ticket_id: Uuid::new_v4(),
            tier,
            quantity: 2,
            attendee: UserInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                special_request: String::new(),
                profile_image: None,
            },
            booked_at: Utc::now(),
        }
    }

    #[test]
    fn artifact_carries_qr_payload_and_filename() {
        let order = order();
        let artifact = TicketArtifact::from_order(&EventDetails::techember_fest(), &order);

        assert_eq!(
            artifact.qr_payload,
            format!("{TICKET_BASE_URL}/{}", order.ticket_id)
        );
        assert_eq!(artifact.file_name, "techember-ticket-Ada-Lovelace.png");
        assert_eq!(artifact.tier_label, "VIP ACCESS");
    }

    #[test]
    fn filename_falls_back_without_a_usable_name() {
        assert_eq!(download_file_name(""), "techember-ticket.png");
        assert_eq!(download_file_name("  ::  "), "techember-ticket.png");
        assert_eq!(
            download_file_name("Grace Hopper"),
            "techember-ticket-Grace-Hopper.png"
        );
    }
}
