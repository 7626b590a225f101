//! [`ActorEntity`] implementation that lets the generic
//! [`ResourceActor`](crate::framework::ResourceActor) act as the booking ledger.

use crate::framework::ActorEntity;
use crate::ledger::LedgerError;
use crate::model::{Booking, BookingCreate, BookingId};

impl ActorEntity for Booking {
    type Id = BookingId;
    type Create = BookingCreate;
    type Error = LedgerError;

    /// Turns a paid reservation into an immutable ledger entry.
    ///
    /// # Errors
    /// `ValidationError` for a zero ticket count or a negative total.
    fn from_create_params(id: BookingId, params: BookingCreate) -> Result<Self, LedgerError> {
        if params.num_tickets == 0 {
            return Err(LedgerError::ValidationError(
                "num_tickets must be positive".into(),
            ));
        }
        if params.total_price.is_sign_negative() && !params.total_price.is_zero() {
            return Err(LedgerError::ValidationError(format!(
                "total_price must not be negative, got {}",
                params.total_price
            )));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            event_id: params.event_id,
            num_tickets: params.num_tickets,
            total_price: params.total_price,
            created_at: params.created_at,
        })
    }
}
