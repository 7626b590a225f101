//! # Query Service
//!
//! Read paths over the inventory and the ledger. Both views are plain data; formatting them
//! for people is left to the caller.

use crate::clients::LedgerClient;
use crate::inventory::EventInventory;
use crate::ledger::LedgerError;
use crate::model::{BookingId, EventId, EventSnapshot, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// One line of the event listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub available_tickets: u32,
    pub total_tickets: u32,
    pub unit_price: Decimal,
}

impl From<EventSnapshot> for EventSummary {
    fn from(snapshot: EventSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            date: snapshot.date,
            available_tickets: snapshot.available_tickets,
            total_tickets: snapshot.total_tickets,
            unit_price: snapshot.unit_price,
        }
    }
}

/// A booking joined with the name of its event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub booking_id: BookingId,
    pub event_id: EventId,
    /// `None` only if the event is unknown to this inventory.
    pub event_name: Option<String>,
    pub num_tickets: u32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct QueryService {
    inventory: Arc<EventInventory>,
    ledger: LedgerClient,
}

impl QueryService {
    pub fn new(inventory: Arc<EventInventory>, ledger: LedgerClient) -> Self {
        Self { inventory, ledger }
    }

    /// All events in creation order. Empty when none exist.
    pub fn list_events(&self) -> Vec<EventSummary> {
        self.inventory
            .snapshots()
            .into_iter()
            .map(EventSummary::from)
            .collect()
    }

    /// The user's bookings in commit order, each with its event name.
    ///
    /// A user with no bookings, or an unregistered id, gets an empty list.
    #[instrument(skip(self))]
    pub async fn user_bookings(&self, user_id: UserId) -> Result<Vec<BookingView>, LedgerError> {
        let history = self.ledger.bookings_for_user(user_id).await?;
        debug!(count = history.len(), "Joining bookings with events");
        Ok(history
            .iter()
            .map(|booking| BookingView {
                booking_id: booking.id,
                event_id: booking.event_id,
                event_name: self
                    .inventory
                    .snapshot(booking.event_id)
                    .ok()
                    .map(|s| s.name),
                num_tickets: booking.num_tickets,
                total_price: booking.total_price,
                created_at: booking.created_at,
            })
            .collect())
    }
}
