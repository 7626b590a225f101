//! # Booking Ledger
//!
//! Append-only record of committed bookings, run as a [`ResourceActor`] over [`Booking`].
//! The actor's single mailbox is the ledger's only synchronization: records are appended in
//! the order they arrive and a per-user query returns them in that order.

pub mod entity;
pub mod error;
pub mod history;

pub use error::*;
pub use history::BookingHistory;

use crate::clients::LedgerClient;
use crate::framework::ResourceActor;
use crate::model::{Booking, BookingId};

/// Creates a new ledger actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Booking>, LedgerClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, BookingId::new);
    let client = LedgerClient::new(generic_client);

    (actor, client)
}
