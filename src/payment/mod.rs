//! # Payment
//!
//! The seam between a booking and whatever charges the customer. The coordinator only sees the
//! [`PaymentGateway`] trait; [`SimulatedGateway`] stands in for a real processor in the demo
//! binary and in tests.
//!
//! A gateway answers with a [`PaymentOutcome`] rather than an error so that a decline (the
//! customer's problem) and a processor failure (ours) stay distinguishable to the caller.

use crate::model::{EventId, UserId};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// What is being charged.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub user_id: UserId,
    pub event_id: EventId,
    pub num_tickets: u32,
    pub amount: Decimal,
}

/// How a charge attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Approved,
    /// The processor refused the charge.
    Declined { reason: String },
    /// The processor could not decide.
    Error { message: String },
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentOutcome::Approved)
    }
}

/// Something that can charge a customer.
///
/// Called with a reservation held, so implementations should return promptly; the coordinator
/// gives up after its configured payment timeout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> PaymentOutcome;
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Approve,
    Decline(String),
    Fail(String),
}

/// In-process gateway with a fixed answer and optional artificial latency.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    mode: Mode,
    latency: Option<Duration>,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::approving()
    }
}

impl SimulatedGateway {
    /// Approves every charge.
    pub fn approving() -> Self {
        Self {
            mode: Mode::Approve,
            latency: None,
        }
    }

    /// Declines every charge with `reason`.
    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            mode: Mode::Decline(reason.into()),
            latency: None,
        }
    }

    /// Reports a processor error for every charge.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            mode: Mode::Fail(message.into()),
            latency: None,
        }
    }

    /// Sleeps for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    #[instrument(skip(self), fields(amount = %request.amount))]
    async fn charge(&self, request: &ChargeRequest) -> PaymentOutcome {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match &self.mode {
            Mode::Approve => {
                debug!("Charge approved");
                PaymentOutcome::Approved
            }
            Mode::Decline(reason) => {
                warn!(%reason, "Charge declined");
                PaymentOutcome::Declined {
                    reason: reason.clone(),
                }
            }
            Mode::Fail(message) => {
                warn!(%message, "Charge failed");
                PaymentOutcome::Error {
                    message: message.clone(),
                }
            }
        }
    }
}
