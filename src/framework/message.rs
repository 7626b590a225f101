//! # Generic Messages
//!
//! Message types exchanged between [`ResourceClient`](crate::framework::ResourceClient) and
//! [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate evaluated inside the actor task for `List` requests.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// The stores behind these actors are append-only, so the request set is the read/insert
/// subset of CRUD:
///
/// - **Create**: builds a record from [`ActorEntity::Create`] under a freshly generated ID.
/// - **Get**: fetches a record by ID.
/// - **List**: returns every record accepted by the filter, in insertion order.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
}

impl<T: ActorEntity> fmt::Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { params, .. } => f.debug_struct("Create").field("params", params).finish(),
            Self::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            Self::List { .. } => f.debug_struct("List").finish_non_exhaustive(),
        }
    }
}
