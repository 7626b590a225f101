//! Error types for the booking ledger.

use thiserror::Error;

/// Errors that can occur while recording or reading bookings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// The booking data provided is invalid.
    #[error("Booking validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
