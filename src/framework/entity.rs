//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type (User, Booking, ...) implements to be
//! stored by the generic [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Records managed this way are append-only: they are created once, read many times and never
//! mutated, so the trait only needs to know how to build a record from its creation payload.
//! Associated types keep the payloads apart: a `User` requires a `UserCreate`, and the compiler
//! rejects a `BookingCreate` sent to the user actor.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by `ResourceActor`.
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The error type for this record.
    ///
    /// One error enum per actor rather than one per message keeps clients to a single
    /// `match` over e.g. `LedgerError`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the generated ID and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;
}
