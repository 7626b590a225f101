use serde::{Deserialize, Serialize};

use super::uuid_id;

uuid_id!(
    /// Type-safe identifier for registered users.
    UserId
);

/// A registered user. Immutable once registered.
///
/// Stored by the user actor, see [`user_actor`](crate::user_actor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Payload for registering a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
}

impl UserCreate {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
