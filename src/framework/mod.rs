//! Generic actor framework for append-only record stores.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - trait that record types implement to be managed by an actor
//! - [`ResourceActor`] - generic actor owning the records of one type
//! - [`ResourceClient`] - type-safe, cloneable handle for sending requests
//! - [`ActorClient`] - default `get` for record-specific client wrappers
//! - [`FrameworkError`] - failures of the plumbing itself
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
