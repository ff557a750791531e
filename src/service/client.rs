//! # Resource Client
//!
//! Cheap, cloneable handle to a [`ResourceActor`](super::ResourceActor).

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

use super::message::ResourceRequest;
use crate::entity::Entity;
use crate::mutation::{MutationClient, MutationError, MutationResult};

/// Type-safe client for the in-process service.
///
/// Holds only a sender; clone it freely across tasks and controls.
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<R, MutationError>>) -> ResourceRequest<T>,
    ) -> Result<R, MutationError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| MutationError::ServiceClosed)?;
        response.await.map_err(|_| MutationError::ServiceDropped)?
    }

    #[instrument(skip(self), fields(entity_kind = T::KIND))]
    pub async fn create(&self, input: T::Input) -> Result<T, MutationError> {
        self.request(|respond_to| ResourceRequest::Create { input, respond_to })
            .await
    }

    #[instrument(skip(self), fields(entity_kind = T::KIND))]
    pub async fn get(&self, id: &str) -> Result<Option<T>, MutationError> {
        let id = id.to_string();
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    #[instrument(skip(self), fields(entity_kind = T::KIND))]
    pub async fn list(&self) -> Result<Vec<T>, MutationError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    #[instrument(skip(self), fields(entity_kind = T::KIND))]
    pub async fn update(&self, id: &str, input: T::Input) -> Result<MutationResult<T>, MutationError> {
        let id = id.to_string();
        self.request(|respond_to| ResourceRequest::Update { id, input, respond_to })
            .await
    }

    #[instrument(skip(self), fields(entity_kind = T::KIND))]
    pub async fn delete(&self, id: &str) -> Result<(), MutationError> {
        let id = id.to_string();
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}

#[async_trait]
impl<T: Entity> MutationClient<T> for ResourceClient<T> {
    async fn update_entity(
        &self,
        id: &str,
        payload: T::Input,
    ) -> Result<MutationResult<T>, MutationError> {
        self.update(id, payload).await
    }

    async fn delete_entity(&self, id: &str) -> Result<(), MutationError> {
        self.delete(id).await
    }
}
