//! Error types for the event inventory.

use crate::model::EventId;
use thiserror::Error;

/// Errors that can occur while creating events or moving tickets in and out of a pool.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// A count, price or ticket total was out of range. Not retryable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The event does not exist.
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// The pool holds fewer tickets than requested. The caller may retry with a smaller count.
    #[error("Insufficient inventory for event {event_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        event_id: EventId,
        requested: u32,
        available: u32,
    },
}
