//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! ```bash
//! # Bookings, releases and actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Every request with its payload
//! RUST_LOG=debug cargo run
//!
//! # Only the inventory
//! RUST_LOG=ticket_reservation::inventory=debug cargo run
//! ```
//!
//! A booking at `info` reads roughly:
//!
//! ```text
//! INFO Actor started entity_type="User"
//! INFO book_tickets: Created entity_type="Booking" id=5b1f... size=1
//! INFO book_tickets:record: Booking recorded booking_id=5b1f...
//! INFO book_tickets: Booked booking_id=5b1f... total_price=100.00
//! ```
//!
//! and a declined one:
//!
//! ```text
//! WARN book_tickets:charge: Charge declined reason="insufficient funds"
//! WARN book_tickets: Payment declined, releasing reservation reason="insufficient funds"
//! INFO book_tickets: Released event_id=9c0e... released=2 available=100
//! ```

/// Installs the global subscriber. Does nothing if one is already set, so tests can call it
/// freely.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and span names already say where a line came from
        .compact()
        .try_init();
}
