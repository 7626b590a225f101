use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::ledger::{BookingHistory, LedgerError};
use crate::model::{Booking, BookingCreate, BookingId, UserId};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the booking ledger actor.
#[derive(Clone)]
pub struct LedgerClient {
    inner: ResourceClient<Booking>,
}

impl LedgerClient {
    pub fn new(inner: ResourceClient<Booking>) -> Self {
        Self { inner }
    }

    /// Appends a committed booking and returns its fresh id.
    #[instrument(skip(self, booking), fields(user_id = %booking.user_id, event_id = %booking.event_id))]
    pub async fn record(&self, booking: BookingCreate) -> Result<BookingId, LedgerError> {
        debug!(num_tickets = booking.num_tickets, total = %booking.total_price, "Sending request");
        let id = self.inner.create(booking).await.map_err(Self::map_error)?;
        info!(booking_id = %id, "Booking recorded");
        Ok(id)
    }

    /// The bookings of `user_id` in commit order. Unknown users get an empty history.
    #[instrument(skip(self))]
    pub async fn bookings_for_user(&self, user_id: UserId) -> Result<BookingHistory, LedgerError> {
        debug!("Sending request");
        let bookings = self
            .inner
            .list(Box::new(move |b: &Booking| b.user_id == user_id))
            .await
            .map_err(Self::map_error)?;
        Ok(BookingHistory::new(bookings))
    }

    /// Every booking in commit order.
    #[instrument(skip(self))]
    pub async fn all_bookings(&self) -> Result<BookingHistory, LedgerError> {
        debug!("Sending request");
        let bookings = self
            .inner
            .list(Box::new(|_: &Booking| true))
            .await
            .map_err(Self::map_error)?;
        Ok(BookingHistory::new(bookings))
    }
}

#[async_trait]
impl ActorClient<Booking> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<Booking> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<LedgerError>() {
                Ok(ledger_error) => *ledger_error,
                Err(other) => LedgerError::ActorCommunicationError(other.to_string()),
            },
            other => LedgerError::ActorCommunicationError(other.to_string()),
        }
    }
}
