use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::uuid_id;

uuid_id!(
    /// Type-safe identifier for events.
    EventId
);

/// Payload for creating a new event with a finite ticket pool.
#[derive(Debug, Clone)]
pub struct EventCreate {
    pub name: String,
    pub date: NaiveDate,
    pub total_tickets: u32,
    pub unit_price: Decimal,
}

impl EventCreate {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        total_tickets: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            total_tickets,
            unit_price,
        }
    }
}

/// A consistent, point-in-time view of one event.
///
/// `available_tickets` is read under the event's lock, so a snapshot never observes a
/// half-applied reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub available_tickets: u32,
    pub total_tickets: u32,
    pub unit_price: Decimal,
}

impl EventSnapshot {
    /// Tickets currently held by reservations or committed bookings.
    pub fn sold_tickets(&self) -> u32 {
        self.total_tickets - self.available_tickets
    }

    pub fn is_sold_out(&self) -> bool {
        self.available_tickets == 0
    }
}
