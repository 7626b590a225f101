//! # Ticket Reservation
//!
//! > **An event ticketing engine that cannot oversell.**
//!
//! Events have a finite pool of tickets, users book against that pool, and any number of tasks
//! may book at the same time. Every successful booking is paid for and recorded, and every
//! failed one gives its tickets back.
//!
//! ## Core Concepts
//!
//! ### Reserve, pay, commit
//! A booking first takes tickets out of the pool ([`EventInventory::try_reserve`]), then charges
//! the customer, then records the booking. A failed charge or a failed record releases the
//! reservation. Payment never runs under a lock, so a slow gateway only delays its own booking.
//!
//! ### Per-event locking
//! Each event's counter has its own lock. Check-and-decrement is one critical section, so the
//! tickets granted for an event never exceed its total, and bookings for different events never
//! wait on each other.
//!
//! ### Actors for append-only stores
//! Users and bookings are only ever inserted and read. Each lives in a generic
//! [`ResourceActor`](framework::ResourceActor) on its own Tokio task, which serializes access
//! without a lock. See [`framework`] for the pattern and [`framework::mock`] for testing clients
//! without a running actor.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic actor, client, and the [`ActorEntity`](framework::ActorEntity) contract.
//!
//! ### 2. The Data ([`model`])
//! Ids, events, users and bookings.
//!
//! ### 3. The Components
//! - [`inventory`]: per-event ticket counters and the [`Reservation`](inventory::Reservation)
//!   token
//! - [`user_actor`] and [`ledger`]: the user store and the booking ledger
//! - [`clients`]: typed handles to those actors
//! - [`payment`]: the gateway seam
//! - [`coordinator`]: the booking workflow
//! - [`query`]: event listings and booking histories
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`TicketingSystem`](lifecycle::TicketingSystem) wires everything up from a
//! [`SystemConfig`](config::SystemConfig) and shuts it down again.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```
//!
//! [`EventInventory::try_reserve`]: inventory::EventInventory::try_reserve

pub mod clients;
pub mod config;
pub mod coordinator;
pub mod framework;
pub mod inventory;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod payment;
pub mod query;
pub mod user_actor;
