//! # Remote Mutation Client
//!
//! The console never talks to the platform API directly. Anything that can
//! update or delete a record implements [`MutationClient`]; the
//! [`ResourceActionControl`](crate::control::ResourceActionControl) only ever
//! sees this trait.
//!
//! Two implementations ship with the crate:
//! - [`ResourceClient`](crate::service::ResourceClient), backed by the
//!   in-process [`ResourceActor`](crate::service::ResourceActor);
//! - the same client wired to a [`MockService`](crate::service::mock::MockService)
//!   for tests.

pub mod error;

pub use error::MutationError;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Response of an update call.
///
/// `data` carries the canonical record as stored by the service. It may be
/// absent: the service acknowledged the update without echoing the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResult<T> {
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> MutationResult<T> {
    pub fn with_data(data: T) -> Self {
        Self { data: Some(data) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }
}

/// The two remote operations a control can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Update => f.write_str("update"),
            MutationKind::Delete => f.write_str("delete"),
        }
    }
}

/// Remote side of the update/delete affordance.
///
/// Each call is independent. No version stamp is sent, so concurrent edits of
/// the same record from two sessions are not detected here.
#[async_trait]
pub trait MutationClient<T: Entity>: Send + Sync {
    /// Update record `id` with `payload`.
    async fn update_entity(
        &self,
        id: &str,
        payload: T::Input,
    ) -> Result<MutationResult<T>, MutationError>;

    /// Delete record `id`.
    async fn delete_entity(&self, id: &str) -> Result<(), MutationError>;
}
