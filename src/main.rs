//! # Admin Console Demo
//!
//! Walks through the two core flows against the in-process services:
//! 1. Dispatching a few settings paths (redirects and not-found included).
//! 2. Editing and then deleting a custom dashboard through a
//!    [`ResourceActionControl`](admin_console::control::ResourceActionControl).
//!
//! An optional first argument points at another TOML configuration.

use std::sync::{Arc, Mutex};

use admin_console::config::ConsoleConfig;
use admin_console::control::{ActionKind, MutationOutcome, Placement, ResourceActionControl};
use admin_console::lifecycle::ConsoleServices;
use admin_console::model::{CustomDashboard, Tag};
use admin_console::routing::Outcome;
use admin_console::settings;
use admin_console::telemetry::setup_tracing;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::builtin()?,
    };
    let routes = settings::table_from(&config)?;

    // 1. Navigation
    let span = tracing::info_span!("navigation");
    async {
        for path in ["", "security", "taxonomies/cves", "custom_dashboards", "totally_unknown"] {
            let dispatch = routes.dispatch(path);
            match dispatch.outcome {
                Outcome::Render(panel) => info!(
                    requested = path,
                    shown = %dispatch.path,
                    redirects = dispatch.redirects,
                    %panel,
                    "Panel"
                ),
                Outcome::NotFound => info!(requested = path, "Not found"),
            }
        }
    }
    .instrument(span)
    .await;

    // 2. Record actions
    let services = ConsoleServices::start(
        &config.service,
        [CustomDashboard::new("42", "Foo")],
        [Tag::new("t1", "critical", "#ff0000")],
    );

    let listed = Arc::new(Mutex::new(services.dashboards.list().await?));
    let span = tracing::info_span!("dashboard_actions");
    async {
        let Some(dashboard) = lock_first(&listed) else {
            error!("No dashboard to work with");
            return;
        };

        let on_update = {
            let listed = listed.clone();
            move |updated: CustomDashboard| {
                let mut list = listed.lock().unwrap_or_else(|p| p.into_inner());
                if let Some(slot) = list
                    .iter_mut()
                    .find(|d| d.custom_dashboard_id == updated.custom_dashboard_id)
                {
                    *slot = updated;
                }
            }
        };
        let on_delete = {
            let listed = listed.clone();
            move |id: String| {
                let mut list = listed.lock().unwrap_or_else(|p| p.into_inner());
                list.retain(|d| d.custom_dashboard_id != id);
            }
        };

        let control = ResourceActionControl::new(dashboard, services.dashboards.clone())
            .placement(Placement::InList)
            .on_update(on_update)
            .on_delete(on_delete);

        // Edit: rename the dashboard.
        if control.trigger(ActionKind::Update).is_ok() {
            if let Some(form) = control.edit_form() {
                info!(title = %form.title, "Drawer opened");
                let mut values = form.initial_values;
                values.custom_dashboard_name = "Foo (renamed)".to_string();
                match control.submit_edit(values) {
                    Ok(pending) => log_outcome(pending.outcome().await),
                    Err(e) => error!(error = %e, "Edit refused"),
                }
            }
        }

        // An edit the service rejects: the drawer closes all the same.
        if control.open_edit().is_ok() {
            match control.submit_edit(Default::default()) {
                Ok(pending) => log_outcome(pending.outcome().await),
                Err(e) => error!(error = %e, "Edit refused"),
            }
        }

        // Delete.
        if control.trigger(ActionKind::Delete).is_ok() {
            if let Some(prompt) = control.delete_prompt() {
                info!(text = %prompt.text, "Dialog opened");
            }
            match control.submit_delete() {
                Ok(pending) => log_outcome(pending.outcome().await),
                Err(e) => error!(error = %e, "Delete refused"),
            }
        }

        info!(
            modal = ?control.modal_state(),
            remaining = listed.lock().map(|l| l.len()).unwrap_or_default(),
            "Actions done"
        );
    }
    .instrument(span)
    .await;

    services.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

fn lock_first(list: &Mutex<Vec<CustomDashboard>>) -> Option<CustomDashboard> {
    list.lock().ok().and_then(|l| l.first().cloned())
}

fn log_outcome(outcome: MutationOutcome<CustomDashboard>) {
    match outcome {
        MutationOutcome::Updated(Some(dashboard)) => {
            info!(name = %dashboard.custom_dashboard_name, "Dashboard updated")
        }
        MutationOutcome::Updated(None) => info!("Dashboard updated (no data returned)"),
        MutationOutcome::Deleted(id) => info!(%id, "Dashboard deleted"),
        MutationOutcome::Failed(e) => error!(error = %e, "Mutation failed, dialog closed"),
        MutationOutcome::Abandoned => error!("Mutation abandoned"),
    }
}
