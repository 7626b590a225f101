//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod directory;
pub mod ledger_client;
pub mod user_client;

pub use directory::*;
pub use ledger_client::*;
pub use user_client::*;
