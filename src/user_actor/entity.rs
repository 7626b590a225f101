//! [`ActorEntity`] implementation that lets the generic
//! [`ResourceActor`](crate::framework::ResourceActor) store [`User`] records.

use crate::framework::ActorEntity;
use crate::model::{User, UserCreate, UserId};
use crate::user_actor::UserError;

impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Error = UserError;

    /// Builds a user from registration data.
    ///
    /// # Errors
    /// `ValidationError` when the username is blank.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let username = params.username.trim();
        if username.is_empty() {
            return Err(UserError::ValidationError(
                "username must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            username: username.to_string(),
            email: params.email,
        })
    }
}
