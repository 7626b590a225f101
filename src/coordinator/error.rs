//! Error types for the booking workflow.

use crate::inventory::InventoryError;
use crate::ledger::LedgerError;
use crate::model::UserId;
use crate::user_actor::UserError;
use thiserror::Error;

/// Why a booking did not happen.
///
/// Whatever the variant, no tickets stay reserved for a failed booking.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingError {
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `NotFound` and `InsufficientInventory` from the inventory, unchanged.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    /// The gateway errored or did not answer in time.
    #[error("Payment failed: {reason}")]
    PaymentFailed { reason: String },

    #[error("User directory error: {0}")]
    Directory(#[from] UserError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
