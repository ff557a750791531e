//! # In-process Resource Service
//!
//! A reference implementation of the [`MutationClient`](crate::mutation::MutationClient)
//! contract that keeps records in memory. The demo binary and the integration
//! tests run controls against it; production deployments plug their own
//! client in instead.
//!
//! - [`ResourceActor`] owns the records and processes requests sequentially.
//! - [`ResourceClient`] is the cloneable handle used by controls and panels.
//! - [`mock`] provides an expectation-based stand-in for tests.

pub mod actor;
pub mod client;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use message::{ResourceRequest, Response};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::entity::Entity;

/// Spawns a service for `T` whose generated ids look like `{prefix}_{n}`.
///
/// `records` are loaded before the first request is served. Must be called
/// inside a tokio runtime.
pub fn spawn<T: Entity>(
    buffer_size: usize,
    prefix: &str,
    records: impl IntoIterator<Item = T>,
) -> (ResourceClient<T>, JoinHandle<()>) {
    let counter = Arc::new(AtomicU64::new(1));
    let prefix = prefix.to_string();
    let next_id = move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, n)
    };

    let (actor, client) = ResourceActor::new(buffer_size, next_id);
    let handle = tokio::spawn(actor.with_records(records).run());
    (client, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomDashboard, CustomDashboardInput};
    use crate::mutation::MutationError;

    fn input(name: &str) -> CustomDashboardInput {
        CustomDashboardInput {
            custom_dashboard_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_service_full_lifecycle() {
        let (client, handle) = spawn::<CustomDashboard>(10, "dashboard", []);

        // 1. Create
        let created = client.create(input("Overview")).await.unwrap();
        assert_eq!(created.custom_dashboard_id, "dashboard_1");

        // 2. Update
        let result = client.update("dashboard_1", input("Renamed")).await.unwrap();
        assert_eq!(result.data.unwrap().custom_dashboard_name, "Renamed");

        // 3. Rejected update keeps the stored record
        let rejected = client.update("dashboard_1", input("")).await;
        assert!(matches!(rejected, Err(MutationError::Validation(_))));
        let stored = client.get("dashboard_1").await.unwrap().unwrap();
        assert_eq!(stored.custom_dashboard_name, "Renamed");

        // 4. Delete
        client.delete("dashboard_1").await.unwrap();
        assert!(client.get("dashboard_1").await.unwrap().is_none());
        assert_eq!(
            client.delete("dashboard_1").await,
            Err(MutationError::NotFound("dashboard_1".into()))
        );

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_seeded_records_are_listed_in_id_order() {
        let (client, _handle) = spawn(
            10,
            "dashboard",
            [CustomDashboard::new("b", "Second"), CustomDashboard::new("a", "First")],
        );

        let names: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.custom_dashboard_name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_closed_service_reports_service_closed() {
        let (actor, client) = ResourceActor::<CustomDashboard>::new(1, || "x".to_string());
        drop(actor);
        assert_eq!(client.delete("x").await, Err(MutationError::ServiceClosed));
    }
}
