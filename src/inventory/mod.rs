//! # Event Inventory
//!
//! Owns every event's ticket counter and is the only place `available_tickets` changes.
//!
//! ## Locking
//!
//! Each event sits in its own slot with its own `parking_lot::Mutex` around the counter.
//! Check-and-decrement happens inside that one critical section, so for a single event the
//! successful reservations form a total order and their sum can never exceed the pool.
//! Reservations against different events never contend.
//!
//! The registry of slots is a `parking_lot::RwLock` that is write-locked only to insert a new
//! event. Lookups take the read lock just long enough to clone the slot's `Arc`, and the
//! registry guard is dropped before the counter lock is taken.
//!
//! No I/O happens while either lock is held.
//!
//! ## Reservations
//!
//! [`try_reserve`](EventInventory::try_reserve) hands out a [`Reservation`] that holds the
//! tickets until it is committed or released. A reservation that is simply dropped gives its
//! tickets back, so an abandoned booking can never strand part of the pool.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use ticket_reservation::inventory::EventInventory;
//! use ticket_reservation::model::EventCreate;
//!
//! let inventory = EventInventory::new();
//! let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
//! let id = inventory
//!     .create(EventCreate::new("Concert A", date, 100, Decimal::new(5000, 2)))
//!     .unwrap();
//!
//! let reservation = inventory.try_reserve(id, 2).unwrap();
//! assert_eq!(reservation.total_price(), Decimal::new(10000, 2));
//! assert_eq!(inventory.snapshot(id).unwrap().available_tickets, 98);
//!
//! inventory.release(reservation).unwrap();
//! assert_eq!(inventory.snapshot(id).unwrap().available_tickets, 100);
//! ```

pub mod error;
pub mod reservation;

pub use error::*;
pub use reservation::Reservation;

use crate::model::{EventCreate, EventId, EventSnapshot};
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// One event: fixed metadata plus the lock-guarded counter.
#[derive(Debug)]
struct EventSlot {
    id: EventId,
    name: String,
    date: NaiveDate,
    total_tickets: u32,
    unit_price: Decimal,
    available: Mutex<u32>,
}

impl EventSlot {
    fn snapshot(&self) -> EventSnapshot {
        let available_tickets = *self.available.lock();
        EventSnapshot {
            id: self.id,
            name: self.name.clone(),
            date: self.date,
            available_tickets,
            total_tickets: self.total_tickets,
            unit_price: self.unit_price,
        }
    }

    /// Adds `count` back, refusing to exceed the total. Returns the new availability.
    fn restore(&self, count: u32) -> Result<u32, InventoryError> {
        let mut available = self.available.lock();
        match available.checked_add(count) {
            Some(restored) if restored <= self.total_tickets => {
                *available = restored;
                Ok(restored)
            }
            _ => Err(InventoryError::InvalidArgument(format!(
                "releasing {count} tickets would exceed the pool of {}",
                self.total_tickets
            ))),
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    slots: HashMap<EventId, Arc<EventSlot>>,
    // creation order, for listings
    order: Vec<EventId>,
}

/// Concurrency-safe store of per-event ticket pools.
///
/// Shared by reference (typically behind an `Arc`); every method takes `&self`.
#[derive(Debug, Default)]
pub struct EventInventory {
    registry: RwLock<Registry>,
}

impl EventInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an event whose whole pool is available.
    ///
    /// # Errors
    /// `InvalidArgument` when `total_tickets` is zero or `unit_price` is negative.
    #[instrument(skip(self), fields(name = %params.name))]
    pub fn create(&self, params: EventCreate) -> Result<EventId, InventoryError> {
        if params.total_tickets == 0 {
            return Err(InventoryError::InvalidArgument(
                "total_tickets must be positive".into(),
            ));
        }
        if params.unit_price.is_sign_negative() && !params.unit_price.is_zero() {
            return Err(InventoryError::InvalidArgument(format!(
                "unit_price must not be negative, got {}",
                params.unit_price
            )));
        }

        let id = EventId::new();
        let slot = Arc::new(EventSlot {
            id,
            name: params.name,
            date: params.date,
            total_tickets: params.total_tickets,
            unit_price: params.unit_price,
            available: Mutex::new(params.total_tickets),
        });

        let mut registry = self.registry.write();
        registry.slots.insert(id, slot);
        registry.order.push(id);
        info!(event_id = %id, total = params.total_tickets, size = registry.order.len(), "Event created");
        Ok(id)
    }

    /// Atomically takes `count` tickets out of the event's pool.
    ///
    /// # Errors
    /// - `InvalidArgument` when `count` is zero.
    /// - `NotFound` when the event does not exist.
    /// - `InsufficientInventory` when fewer than `count` tickets remain; nothing is taken.
    pub fn try_reserve(&self, event_id: EventId, count: u32) -> Result<Reservation, InventoryError> {
        if count == 0 {
            return Err(InventoryError::InvalidArgument(
                "ticket count must be positive".into(),
            ));
        }
        let slot = self.slot(event_id)?;

        let mut available = slot.available.lock();
        if *available < count {
            let available = *available;
            warn!(%event_id, requested = count, available, "Insufficient inventory");
            return Err(InventoryError::InsufficientInventory {
                event_id,
                requested: count,
                available,
            });
        }
        *available -= count;
        debug!(%event_id, reserved = count, remaining = *available, "Reserved");
        drop(available);

        Ok(Reservation::new(slot, count))
    }

    /// Returns a reservation's tickets to the pool.
    ///
    /// Used when a step after the reservation (payment, recording) fails. Dropping the
    /// reservation has the same effect; this is the explicit, checked form.
    ///
    /// # Errors
    /// `NotFound` if the reservation was minted by another inventory. Its tickets still go
    /// back to their own pool when it is dropped.
    pub fn release(&self, reservation: Reservation) -> Result<(), InventoryError> {
        let event_id = reservation.event_id();
        let slot = self.slot(event_id)?;
        if !reservation.belongs_to(&slot) {
            return Err(InventoryError::NotFound(event_id));
        }

        let released = reservation.count();
        match reservation.settle() {
            Ok(available) => {
                info!(%event_id, released, available, "Released");
                Ok(())
            }
            Err(e) => {
                warn!(%event_id, released, error = %e, "Release exceeds pool");
                Err(e)
            }
        }
    }

    /// A consistent view of one event.
    pub fn snapshot(&self, event_id: EventId) -> Result<EventSnapshot, InventoryError> {
        Ok(self.slot(event_id)?.snapshot())
    }

    /// Views of all events in creation order.
    ///
    /// Each event is read under its own lock; the list as a whole is not a single atomic cut
    /// across events.
    pub fn snapshots(&self) -> Vec<EventSnapshot> {
        let slots: Vec<Arc<EventSlot>> = {
            let registry = self.registry.read();
            registry
                .order
                .iter()
                .filter_map(|id| registry.slots.get(id).cloned())
                .collect()
        };
        slots.iter().map(|slot| slot.snapshot()).collect()
    }

    pub fn contains(&self, event_id: EventId) -> bool {
        self.registry.read().slots.contains_key(&event_id)
    }

    pub fn len(&self) -> usize {
        self.registry.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, event_id: EventId) -> Result<Arc<EventSlot>, InventoryError> {
        self.registry
            .read()
            .slots
            .get(&event_id)
            .cloned()
            .ok_or(InventoryError::NotFound(event_id))
    }
}
