//! The token handed out by [`EventInventory::try_reserve`](super::EventInventory::try_reserve).

use super::{EventSlot, InventoryError};
use crate::model::EventId;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Tickets taken out of one event's pool and not yet settled.
///
/// A reservation ends in exactly one of three ways:
///
/// - [`commit`](Self::commit): the booking it paid for is recorded and the tickets stay sold.
/// - [`EventInventory::release`](super::EventInventory::release): the tickets go back.
/// - drop: the tickets go back. This covers every path that abandons a booking halfway,
///   including a caller whose future is cancelled while payment is pending.
///
/// Only the inventory mints one, and settling consumes it, so a reservation can neither be
/// forged nor returned twice. The unit price is captured at reservation time and is what the
/// booking is charged at.
#[must_use = "dropping a reservation returns its tickets; commit it to keep them"]
pub struct Reservation {
    slot: Arc<EventSlot>,
    count: u32,
    unit_price: Decimal,
    settled: bool,
}

impl Reservation {
    pub(super) fn new(slot: Arc<EventSlot>, count: u32) -> Self {
        let unit_price = slot.unit_price;
        Self {
            slot,
            count,
            unit_price,
            settled: false,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.slot.id
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `count * unit_price`, exact in decimal arithmetic.
    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.count)
    }

    /// Keeps the tickets: the booking they were reserved for has been recorded.
    pub fn commit(mut self) {
        self.settled = true;
        debug!(event_id = %self.slot.id, count = self.count, "Reservation committed");
    }

    pub(super) fn belongs_to(&self, slot: &Arc<EventSlot>) -> bool {
        Arc::ptr_eq(&self.slot, slot)
    }

    /// Puts the tickets back and returns the new availability.
    pub(super) fn settle(mut self) -> Result<u32, InventoryError> {
        self.settled = true;
        self.slot.restore(self.count)
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let event_id = self.slot.id;
        match self.slot.restore(self.count) {
            Ok(available) => {
                info!(%event_id, released = self.count, available, "Abandoned reservation returned")
            }
            Err(e) => error!(%event_id, error = %e, "Abandoned reservation could not be returned"),
        }
    }
}

impl fmt::Debug for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reservation")
            .field("event_id", &self.slot.id)
            .field("count", &self.count)
            .field("unit_price", &self.unit_price)
            .field("settled", &self.settled)
            .finish()
    }
}
