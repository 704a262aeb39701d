//! Booking Flow Demo
//!
//! Scripted walkthrough of the three-step wizard against the production
//! persistence adapter: tier selection, attendee details with a directly
//! entered photo URL, confirmation with the ticket render model, and the
//! "book another" reset.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use anyhow::anyhow;
use swiftpass::{
    BookingAction, BookingEnvironment, BookingPhase, BookingReducer, BookingState, Config,
    JsonFileStore, Store, SystemClock,
    ticket::TicketArtifact,
    types::{TierCatalog, TierId},
    upload::CloudinaryClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,swiftpass=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🎫 ============================================");
    println!("   Techember Fest '25 - Booking Demo");
    println!("============================================\n");

    let config = Config::from_env();
    let env = BookingEnvironment::new(
        SystemClock,
        JsonFileStore::new(config.storage.data_dir.clone()),
        CloudinaryClient::new(&config.upload),
    );
    let store = Store::new(
        BookingState::new(TierCatalog::seed()),
        BookingReducer::default(),
        env,
    );

    // Step 0: restore whatever a previous run left behind
    store.send(BookingAction::RestoreSaved).await;

    println!("1️⃣  Available tiers:");
    let tiers = store.state(|s| s.catalog.tiers().to_vec()).await;
    for tier in &tiers {
        let price = if tier.price_usd == 0 {
            "Free".to_string()
        } else {
            format!("${}", tier.price_usd)
        };
        println!(
            "   {:<14} {:<8} {}/{} remaining",
            tier.label, price, tier.available, tier.total
        );
    }

    println!("\n2️⃣  Selecting VIP x3...");
    store
        .send(BookingAction::SelectTier {
            tier: TierId::new("VIP"),
        })
        .await;
    store.send(BookingAction::SetQuantity { quantity: 3 }).await;
    store.send(BookingAction::ContinueToDetails).await;
    println!("   ✓ Now on step {}", store.state(BookingState::step).await);

    println!("\n3️⃣  Filling attendee details...");
    store
        .send(BookingAction::SetPhotoUrl {
            url: "https://example.com/avatar.png".to_string(),
        })
        .await;
    store
        .send(BookingAction::SubmitDetails {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            special_request: "Aisle seat, please".to_string(),
        })
        .await;

    let order = store
        .state(|s| match &s.phase {
            BookingPhase::Confirmed { order } => Some(order.clone()),
            _ => None,
        })
        .await
        .ok_or_else(|| anyhow!("booking did not reach confirmation"))?;
    println!("   ✓ Booking confirmed at {}", order.booked_at);

    println!("\n4️⃣  Ticket artifact:");
    let event = store.state(|s| s.event.clone()).await;
    let artifact = TicketArtifact::from_order(&event, &order);
    println!("   Event:    {}", artifact.event.name);
    println!("   Venue:    {}", artifact.event.venue);
    println!("   When:     {}", artifact.event.date_line);
    println!("   Holder:   {} <{}>", artifact.holder.name, artifact.holder.email);
    println!("   Tier:     {} x{}", artifact.tier_label, artifact.quantity);
    println!("   QR:       {}", artifact.qr_payload);
    println!("   Download: {}", artifact.file_name);

    println!("\n5️⃣  Booking another...");
    store.send(BookingAction::BookAnother).await;
    let (step, vip_left) = store
        .state(|s| {
            (
                s.step(),
                s.catalog
                    .get(&TierId::new("VIP"))
                    .map_or(0, |tier| tier.available),
            )
        })
        .await;
    println!("   ✓ Back on step {step}, VIP availability now {vip_left}/20");

    println!("\n✅ Demo complete\n");
    Ok(())
}
