//! # Service Messages
//!
//! Messages exchanged between a [`ResourceClient`](super::ResourceClient) and
//! the [`ResourceActor`](super::ResourceActor) that owns the records.

use tokio::sync::oneshot;

use crate::entity::Entity;
use crate::mutation::{MutationError, MutationResult};

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, MutationError>>;

/// Requests understood by the in-process service.
///
/// `Create`, `Get` and `List` let panels and tests seed and inspect records;
/// `Update` and `Delete` back the [`MutationClient`](crate::mutation::MutationClient)
/// contract.
#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        input: T::Input,
        respond_to: Response<T>,
    },
    Get {
        id: String,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: String,
        input: T::Input,
        respond_to: Response<MutationResult<T>>,
    },
    Delete {
        id: String,
        respond_to: Response<()>,
    },
}
