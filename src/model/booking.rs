use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::uuid_id;
use super::{EventId, UserId};

uuid_id!(
    /// Type-safe identifier for bookings.
    BookingId
);

/// A committed booking. Bookings are never mutated or removed.
///
/// `total_price` is `num_tickets * unit_price` with the unit price captured when the tickets
/// were reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub num_tickets: u32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a booking in the ledger.
#[derive(Debug, Clone)]
pub struct BookingCreate {
    pub user_id: UserId,
    pub event_id: EventId,
    pub num_tickets: u32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}
