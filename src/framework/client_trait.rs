//! # ActorClient Trait
//!
//! Common surface for record-specific clients, adding a default `get` built on top of a
//! generic `ResourceClient`.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard read operation.
///
/// Implementors only say where their inner [`ResourceClient`] lives and how a
/// [`FrameworkError`] maps into their own error type.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}
