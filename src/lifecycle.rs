//! # Service Lifecycle
//!
//! Starts the in-process resource services the console talks to, and stops
//! them again.
//!
//! Each service is a [`ResourceActor`](crate::service::ResourceActor) in its
//! own task. Shutting down drops the clients held here, which closes the
//! channels; every actor then drains its queue and exits. Controls hold their
//! own client handles, so drop them before calling [`ConsoleServices::shutdown`].

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::ServiceConfig;
use crate::model::{CustomDashboard, Tag};
use crate::service::{self, ResourceClient};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Service task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Running services, one per resource kind.
pub struct ConsoleServices {
    pub dashboards: ResourceClient<CustomDashboard>,
    pub tags: ResourceClient<Tag>,
    handles: Vec<JoinHandle<()>>,
}

impl ConsoleServices {
    /// Spawns every service, pre-loaded with `dashboards` and `tags`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(
        config: &ServiceConfig,
        dashboards: impl IntoIterator<Item = CustomDashboard>,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        let (dashboard_client, dashboard_handle) =
            service::spawn(config.buffer_size, "dashboard", dashboards);
        let (tag_client, tag_handle) = service::spawn(config.buffer_size, "tag", tags);

        Self {
            dashboards: dashboard_client,
            tags: tag_client,
            handles: vec![dashboard_handle, tag_handle],
        }
    }

    /// Closes every channel and waits for the services to stop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down services...");

        drop(self.dashboards);
        drop(self.tags);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Service task failed");
                return Err(e.into());
            }
        }

        info!("Services stopped.");
        Ok(())
    }
}
