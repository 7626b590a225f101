//! Runtime orchestration and lifecycle management.
//!
//! - [`TicketingSystem`] - starts the actors, wires the coordinator and query service, and
//!   shuts everything down
//! - [`setup_tracing`] - initializes logging

pub mod ticketing_system;
pub mod tracing;

pub use self::tracing::*;
pub use ticketing_system::*;
