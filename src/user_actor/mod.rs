//! User-specific resource logic and entity implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::framework::ResourceActor;
use crate::model::{User, UserId};

/// Creates a new User actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, UserId::new);
    let client = UserClient::new(generic_client);

    (actor, client)
}
