use crate::clients::UserDirectory;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{User, UserCreate, UserId};
use crate::user_actor::UserError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn register_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<UserError>() {
                Ok(user_error) => *user_error,
                Err(other) => UserError::ActorCommunicationError(other.to_string()),
            },
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl UserDirectory for UserClient {
    async fn exists(&self, user_id: UserId) -> Result<bool, UserError> {
        Ok(self.get(user_id).await?.is_some())
    }

    async fn username(&self, user_id: UserId) -> Result<Option<String>, UserError> {
        Ok(self.get(user_id).await?.map(|user| user.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    fn alice() -> User {
        User {
            id: UserId::new(),
            username: "alice".into(),
            email: "alice@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_directory_reports_known_user() {
        let alice = alice();
        let mut mock = MockClient::<User>::new();
        mock.expect_get(alice.id).return_ok(Some(alice.clone()));
        mock.expect_get(alice.id).return_ok(Some(alice.clone()));

        let client = UserClient::new(mock.client());
        assert!(client.exists(alice.id).await.unwrap());
        assert_eq!(
            client.username(alice.id).await.unwrap().as_deref(),
            Some("alice")
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_directory_reports_unknown_user() {
        let stranger = UserId::new();
        let mut mock = MockClient::<User>::new();
        mock.expect_get(stranger).return_ok(None);

        let client = UserClient::new(mock.client());
        assert!(!client.exists(stranger).await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn test_register_surfaces_validation_error() {
        let mut mock = MockClient::<User>::new();
        mock.expect_create().return_err(FrameworkError::EntityError(Box::new(
            UserError::ValidationError("username must not be empty".into()),
        )));

        let client = UserClient::new(mock.client());
        let err = client
            .register_user(UserCreate::new("", "nobody@example.com"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            UserError::ValidationError("username must not be empty".into())
        );
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let id = UserId::new();
        let mut mock = MockClient::<User>::new();
        mock.expect_get(id).return_err(FrameworkError::ActorClosed);

        let client = UserClient::new(mock.client());
        let err = client.exists(id).await.unwrap_err();
        assert_eq!(
            err,
            UserError::ActorCommunicationError("Actor closed".into())
        );
    }
}
