//! Demo: two users, three events, and a handful of bookings, one of which oversells and one of
//! which targets an event that does not exist.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use ticket_reservation::clients::UserDirectory;
use ticket_reservation::config::SystemConfig;
use ticket_reservation::lifecycle::{setup_tracing, TicketingSystem};
use ticket_reservation::model::{EventCreate, EventId, UserCreate, UserId};
use ticket_reservation::query::EventSummary;
use tracing::{error, info, Instrument};

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn date(raw: &str) -> DemoResult<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?)
}

fn print_events(events: &[EventSummary]) {
    if events.is_empty() {
        println!("No events available.");
        return;
    }
    println!("\n--- Available Events ---");
    for event in events {
        println!("Event ID: {}", event.id);
        println!("  Name: {}", event.name);
        println!("  Date: {}", event.date);
        println!(
            "  Available Tickets: {}/{}",
            event.available_tickets, event.total_tickets
        );
        println!("  Price per Ticket: ${:.2}", event.unit_price);
        println!("{}", "-".repeat(30));
    }
}

async fn book(system: &TicketingSystem, user_id: UserId, event_id: EventId, num_tickets: u32) {
    let span = tracing::info_span!("booking", %user_id, num_tickets);
    let result = system
        .book_tickets(user_id, event_id, num_tickets)
        .instrument(span)
        .await;
    match result {
        Ok(booking_id) => println!("Booked {num_tickets} tickets. Booking ID: {booking_id}"),
        Err(e) => {
            error!(error = %e, "Booking failed");
            println!("Error: {e}");
        }
    }
}

async fn print_bookings(system: &TicketingSystem, user_id: UserId, username: &str) -> DemoResult<()> {
    println!("\n--- Bookings for {username} ---");
    let bookings = system.user_bookings(user_id).await?;
    if bookings.is_empty() {
        println!("  No bookings found.");
    }
    for booking in bookings {
        println!("  Booking ID: {}", booking.booking_id);
        println!(
            "  Event: {}",
            booking.event_name.as_deref().unwrap_or("<unknown event>")
        );
        println!("  Tickets: {}", booking.num_tickets);
        println!("  Total Price: ${:.2}", booking.total_price);
        println!("  Timestamp: {}", booking.created_at.to_rfc3339());
        println!("{}", "-".repeat(20));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> DemoResult<()> {
    setup_tracing();

    let config = SystemConfig::from_env()?;
    info!(?config, "Starting ticket reservation demo");
    let system = TicketingSystem::new(config);

    // 1. Users
    let alice = system
        .register_user(UserCreate::new("Alice", "alice@example.com"))
        .await?;
    let bob = system
        .register_user(UserCreate::new("Bob", "bob@example.com"))
        .await?;

    // 2. Events
    let concert = system.create_event(EventCreate::new(
        "Concert A",
        date("2026-03-15")?,
        100,
        Decimal::new(5000, 2),
    ))?;
    let comedy = system.create_event(EventCreate::new(
        "Comedy Show",
        date("2026-03-20")?,
        50,
        Decimal::new(2500, 2),
    ))?;
    let sports = system.create_event(EventCreate::new(
        "Sports Match",
        date("2026-03-22")?,
        200,
        Decimal::new(7500, 2),
    ))?;

    print_events(&system.list_events());

    // 3. Bookings
    println!("\n--- Alice booking tickets ---");
    book(&system, alice, concert, 2).await;
    book(&system, alice, comedy, 1).await;
    book(&system, alice, concert, 99).await; // only 98 left
    book(&system, alice, concert, 98).await;

    println!("\n--- Bob booking tickets ---");
    book(&system, bob, comedy, 3).await;
    book(&system, bob, sports, 5).await;
    match "non_existent_event".parse::<EventId>() {
        Ok(event_id) => book(&system, bob, event_id, 1).await,
        Err(e) => println!("Error: invalid event id: {e}"),
    }
    book(&system, bob, EventId::new(), 1).await;

    print_events(&system.list_events());

    for user_id in [alice, bob] {
        let username = system
            .users()
            .username(user_id)
            .await?
            .unwrap_or_else(|| user_id.to_string());
        print_bookings(&system, user_id, &username).await?;
    }

    system.shutdown().await?;
    info!("Demo complete");
    Ok(())
}
