//! # Reservation Coordinator
//!
//! Runs the booking workflow:
//!
//! 1. the user must be registered,
//! 2. the ticket count must be positive,
//! 3. the tickets are reserved in the [`EventInventory`],
//! 4. the price is taken from the reservation,
//! 5. the customer is charged through the [`PaymentGateway`],
//! 6. the booking is appended to the ledger.
//!
//! Payment happens with no lock held. The reservation is returned to the pool if the charge is
//! declined, errors, times out, or if the ledger refuses the booking afterwards. Either the
//! decrement and the ledger entry both persist or neither does.
//!
//! Callers may drop a `book_tickets` future at any point. Before step 6 the dropped
//! [`Reservation`] hands its tickets back. Step 6 runs on its own task that owns the
//! reservation, so once a booking is sent to the ledger it is committed or released on the
//! ledger's answer, whether or not anyone still waits for it.

pub mod error;

pub use error::*;

use crate::clients::{LedgerClient, UserDirectory};
use crate::inventory::{EventInventory, Reservation};
use crate::ledger::LedgerError;
use crate::model::{BookingCreate, BookingId, EventId, UserId};
use crate::payment::{ChargeRequest, PaymentGateway, PaymentOutcome};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Books tickets by combining inventory, payment and ledger.
///
/// Cheap to clone; every clone shares the same collaborators, so it can be handed to as many
/// concurrent tasks as needed.
#[derive(Clone)]
pub struct ReservationCoordinator {
    inventory: Arc<EventInventory>,
    users: Arc<dyn UserDirectory>,
    ledger: LedgerClient,
    gateway: Arc<dyn PaymentGateway>,
    payment_timeout: Duration,
}

impl ReservationCoordinator {
    pub fn new(
        inventory: Arc<EventInventory>,
        users: Arc<dyn UserDirectory>,
        ledger: LedgerClient,
        gateway: Arc<dyn PaymentGateway>,
        payment_timeout: Duration,
    ) -> Self {
        Self {
            inventory,
            users,
            ledger,
            gateway,
            payment_timeout,
        }
    }

    /// Books `num_tickets` for `user_id` at `event_id`.
    ///
    /// # Errors
    /// - `UnknownUser` if the user is not registered.
    /// - `InvalidArgument` if `num_tickets` is zero.
    /// - `Inventory(NotFound | InsufficientInventory)` straight from the inventory.
    /// - `PaymentDeclined` / `PaymentFailed` after the reservation was released.
    /// - `Ledger` if recording failed; the reservation was released as well.
    /// - `Directory` if the user store could not be reached.
    #[instrument(skip(self))]
    pub async fn book_tickets(
        &self,
        user_id: UserId,
        event_id: EventId,
        num_tickets: u32,
    ) -> Result<BookingId, BookingError> {
        if !self.users.exists(user_id).await? {
            warn!("Unknown user");
            return Err(BookingError::UnknownUser(user_id));
        }
        if num_tickets == 0 {
            return Err(BookingError::InvalidArgument(
                "num_tickets must be positive".into(),
            ));
        }

        let reservation = self.inventory.try_reserve(event_id, num_tickets)?;
        let total_price = reservation.total_price();

        let request = ChargeRequest {
            user_id,
            event_id,
            num_tickets,
            amount: total_price,
        };
        let outcome = match tokio::time::timeout(self.payment_timeout, self.gateway.charge(&request)).await {
            Ok(outcome) => outcome,
            Err(_) => PaymentOutcome::Error {
                message: format!("no answer within {:?}", self.payment_timeout),
            },
        };

        match outcome {
            PaymentOutcome::Approved => {}
            PaymentOutcome::Declined { reason } => {
                warn!(%reason, "Payment declined, releasing reservation");
                self.compensate(reservation);
                return Err(BookingError::PaymentDeclined { reason });
            }
            PaymentOutcome::Error { message } => {
                warn!(%message, "Payment failed, releasing reservation");
                self.compensate(reservation);
                return Err(BookingError::PaymentFailed { reason: message });
            }
        }

        let booking = BookingCreate {
            user_id,
            event_id,
            num_tickets,
            total_price,
            created_at: Utc::now(),
        };
        let ledger = self.ledger.clone();
        let inventory = self.inventory.clone();
        let commit = tokio::spawn(async move {
            match ledger.record(booking).await {
                Ok(booking_id) => {
                    reservation.commit();
                    Ok(booking_id)
                }
                Err(e) => {
                    error!(error = %e, "Recording failed after payment, releasing reservation");
                    if let Err(release_error) = inventory.release(reservation) {
                        error!(error = %release_error, "Compensating release failed");
                    }
                    Err(e)
                }
            }
        });

        match commit.await {
            Ok(Ok(booking_id)) => {
                info!(%booking_id, %total_price, "Booked");
                Ok(booking_id)
            }
            Ok(Err(e)) => Err(BookingError::Ledger(e)),
            // the task only fails by panicking; its reservation was dropped and so returned
            Err(join_error) => Err(BookingError::Ledger(LedgerError::ActorCommunicationError(
                join_error.to_string(),
            ))),
        }
    }

    fn compensate(&self, reservation: Reservation) {
        if let Err(e) = self.inventory.release(reservation) {
            error!(error = %e, "Compensating release failed");
        }
    }
}
