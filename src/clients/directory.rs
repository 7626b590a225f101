//! The read-only view of registered users that bookings validate against.

use crate::model::UserId;
use crate::user_actor::UserError;
use async_trait::async_trait;

/// Lookup of registered users.
///
/// Implemented by [`UserClient`](crate::clients::UserClient); tests substitute their own.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether `user_id` belongs to a registered user.
    async fn exists(&self, user_id: UserId) -> Result<bool, UserError>;

    /// The username registered under `user_id`, if any.
    async fn username(&self, user_id: UserId) -> Result<Option<String>, UserError>;
}
