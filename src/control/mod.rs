//! # Resource Action Control
//!
//! The uniform "Update / Delete" affordance attached to one record.
//!
//! A control owns a [`ModalState`] and walks it through the edit drawer or the
//! delete dialog. Submitting hands the payload to the
//! [`MutationClient`](crate::mutation::MutationClient) on a spawned task, so
//! the caller (and every other control) stays responsive while the call is in
//! flight.
//!
//! ## Guarantees
//!
//! - **One mutation at a time.** The submission takes the in-flight slot under
//!   the same lock that validates the modal state; a second submit is refused
//!   with [`ControlError::MutationInFlight`] and issues no remote call.
//! - **The modal always closes.** Every submission ends with the `Settle`
//!   transition, on success and on failure. A failed mutation is logged and
//!   otherwise looks exactly like a cancelled dialog: the callback is skipped.
//! - **Callbacks are optional.** Missing `on_update` / `on_delete` are no-ops.
//! - **No callback after unmount.** Dropping the control cancels its lifetime
//!   token; a pending submission stops waiting, skips the callbacks and
//!   resolves to [`MutationOutcome::Abandoned`]. The remote call may still have
//!   reached the service.
//!
//! No version stamp is sent with an update, so an edit made concurrently from
//! another session is silently overwritten.

pub mod affordance;
pub mod callback;
pub mod error;
pub mod state;

pub use affordance::{ActionEntry, ActionKind, ButtonVariant, DeletePrompt, EditForm, Placement, ENTRIES};
pub use callback::Callback;
pub use error::ControlError;
pub use state::{ModalEvent, ModalState};

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::entity::Entity;
use crate::mutation::{MutationClient, MutationError, MutationKind, MutationResult};

/// What a finished submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    /// The update went through; `data` is the canonical record if the service
    /// sent one back.
    Updated(Option<T>),
    /// The record with this id was deleted.
    Deleted(String),
    /// The service reported a failure. No callback ran.
    Failed(MutationError),
    /// The control was dropped before the result arrived. No callback ran.
    Abandoned,
}

/// Handle on a submission running in the background.
///
/// Dropping it does not cancel anything; only dropping the control does.
#[derive(Debug)]
pub struct PendingMutation<T> {
    kind: MutationKind,
    handle: JoinHandle<MutationOutcome<T>>,
}

impl<T> PendingMutation<T> {
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the submission to settle.
    ///
    /// A panic raised by a callback is resumed here.
    pub async fn outcome(self) -> MutationOutcome<T> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => MutationOutcome::Abandoned,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    modal: ModalState,
    pending: Option<MutationKind>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Callbacks registered by the owning panel.
struct Listeners<T> {
    on_update: Callback<T>,
    on_delete: Callback<String>,
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            on_update: self.on_update.clone(),
            on_delete: self.on_delete.clone(),
        }
    }
}

impl<T: Clone> Listeners<T> {
    fn notify(&self, outcome: &MutationOutcome<T>) {
        match outcome {
            MutationOutcome::Updated(Some(record)) => self.on_update.emit(record.clone()),
            MutationOutcome::Deleted(id) => self.on_delete.emit(id.clone()),
            _ => {}
        }
    }
}

/// Update/delete affordance for one record.
///
/// # Example
/// ```rust
/// use admin_console::control::{ModalState, ResourceActionControl};
/// use admin_console::model::CustomDashboard;
/// use admin_console::service::mock::MockService;
///
/// #[tokio::main]
/// async fn main() {
///     let mut mock = MockService::<CustomDashboard>::new();
///     mock.expect_update("d1").return_ok(CustomDashboard::new("d1", "Renamed"));
///
///     let control = ResourceActionControl::new(CustomDashboard::new("d1", "Overview"), mock.client())
///         .on_update(|dashboard: CustomDashboard| println!("now {}", dashboard.custom_dashboard_name));
///
///     control.open_edit().unwrap();
///     let mut values = control.edit_form().unwrap().initial_values;
///     values.custom_dashboard_name = "Renamed".into();
///     control.submit_edit(values).unwrap().outcome().await;
///
///     assert_eq!(control.modal_state(), ModalState::None);
///     mock.verify();
/// }
/// ```
pub struct ResourceActionControl<T: Entity, C: ?Sized> {
    entity: T,
    client: Arc<C>,
    slot: Arc<Mutex<Slot>>,
    listeners: Listeners<T>,
    placement: Placement,
    lifetime: CancellationToken,
}

impl<T: Entity, C: MutationClient<T> + 'static> ResourceActionControl<T, C> {
    /// Creates a control for `entity` that owns its own client handle.
    pub fn new(entity: T, client: C) -> Self {
        Self::with_shared_client(entity, Arc::new(client))
    }
}

impl<T: Entity, C: MutationClient<T> + ?Sized + 'static> ResourceActionControl<T, C> {
    /// Creates a control for `entity` backed by a client shared with others.
    pub fn with_shared_client(entity: T, client: Arc<C>) -> Self {
        Self {
            entity,
            client,
            slot: Arc::new(Mutex::new(Slot::default())),
            listeners: Listeners {
                on_update: Callback::noop(),
                on_delete: Callback::noop(),
            },
            placement: Placement::default(),
            lifetime: CancellationToken::new(),
        }
    }

    /// Registers the callback run with the canonical record after an update.
    pub fn on_update(mut self, callback: impl Into<Callback<T>>) -> Self {
        self.listeners.on_update = callback.into();
        self
    }

    /// Registers the callback run with the record id after a delete.
    pub fn on_delete(mut self, callback: impl Into<Callback<String>>) -> Self {
        self.listeners.on_delete = callback.into();
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// The dialog currently shown.
    ///
    /// A submitted dialog stays open until its mutation settles; it accepts a
    /// new submission only once [`pending`](Self::pending) is back to `None`.
    pub fn modal_state(&self) -> ModalState {
        lock(&self.slot).modal
    }

    /// The mutation currently in flight, if any.
    pub fn pending(&self) -> Option<MutationKind> {
        lock(&self.slot).pending
    }

    // --- Affordance ---

    pub fn entries(&self) -> &'static [ActionEntry] {
        &ENTRIES
    }

    pub fn variant(&self) -> ButtonVariant {
        self.placement.variant()
    }

    /// Opens the dialog matching a popover entry.
    pub fn trigger(&self, action: ActionKind) -> Result<ModalState, ControlError> {
        match action {
            ActionKind::Update => self.open_edit(),
            ActionKind::Delete => self.open_delete(),
        }
    }

    /// The edit drawer's content, while it is open.
    pub fn edit_form(&self) -> Option<EditForm<T::Input>> {
        (self.modal_state() == ModalState::Editing).then(|| EditForm {
            title: affordance::edit_title(T::KIND),
            initial_values: self.entity.initial_values(),
            editing: true,
        })
    }

    /// The delete dialog's content, while it is open.
    pub fn delete_prompt(&self) -> Option<DeletePrompt> {
        (self.modal_state() == ModalState::ConfirmingDelete).then(|| DeletePrompt {
            text: affordance::delete_text(T::KIND),
        })
    }

    // --- Transitions ---

    /// `None | ConfirmingDelete -> Editing`. Uses the snapshot held by the control.
    pub fn open_edit(&self) -> Result<ModalState, ControlError> {
        self.transition(ModalEvent::OpenEdit)
    }

    /// `None | Editing -> ConfirmingDelete`.
    pub fn open_delete(&self) -> Result<ModalState, ControlError> {
        self.transition(ModalEvent::OpenDelete)
    }

    /// Closes whatever dialog is open. Never calls the service.
    ///
    /// A mutation already in flight keeps running and still settles.
    pub fn cancel(&self) -> ModalState {
        // Cancel is accepted from every state.
        self.transition(ModalEvent::Cancel).unwrap_or_default()
    }

    fn transition(&self, event: ModalEvent) -> Result<ModalState, ControlError> {
        let mut slot = lock(&self.slot);
        let next = slot.modal.apply(event)?;
        debug!(
            entity_kind = T::KIND,
            id = self.entity.entity_id(),
            label = self.entity.label(),
            from = ?slot.modal,
            to = ?next,
            ?event,
            "Transition"
        );
        slot.modal = next;
        Ok(next)
    }

    // --- Submissions ---

    /// Sends the edit form's payload. Valid only while `Editing`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_edit(&self, payload: T::Input) -> Result<PendingMutation<T>, ControlError> {
        self.begin(ModalEvent::SubmitEdit, MutationKind::Update)?;

        let client = Arc::clone(&self.client);
        let id = self.entity.entity_id().to_string();
        Ok(self.launch(MutationKind::Update, async move {
            let MutationResult { data } = client.update_entity(&id, payload).await?;
            Ok(MutationOutcome::Updated(data))
        }))
    }

    /// Confirms the deletion. Valid only while `ConfirmingDelete`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_delete(&self) -> Result<PendingMutation<T>, ControlError> {
        self.begin(ModalEvent::SubmitDelete, MutationKind::Delete)?;

        let client = Arc::clone(&self.client);
        let id = self.entity.entity_id().to_string();
        Ok(self.launch(MutationKind::Delete, async move {
            client.delete_entity(&id).await?;
            Ok(MutationOutcome::Deleted(id))
        }))
    }

    /// Validates the submission and takes the in-flight slot, atomically.
    fn begin(&self, event: ModalEvent, kind: MutationKind) -> Result<(), ControlError> {
        let mut slot = lock(&self.slot);
        if let Some(pending) = slot.pending {
            return Err(ControlError::MutationInFlight(pending));
        }
        slot.modal = slot.modal.apply(event)?;
        slot.pending = Some(kind);
        debug!(entity_kind = T::KIND, id = self.entity.entity_id(), %kind, "Submitted");
        Ok(())
    }

    fn launch<F>(&self, kind: MutationKind, call: F) -> PendingMutation<T>
    where
        F: Future<Output = Result<MutationOutcome<T>, MutationError>> + Send + 'static,
    {
        let slot = Arc::clone(&self.slot);
        let listeners = self.listeners.clone();
        let lifetime = self.lifetime.clone();
        let id = self.entity.entity_id().to_string();

        let handle = tokio::spawn(async move {
            let entity_kind = T::KIND;
            let result = tokio::select! {
                biased;
                _ = lifetime.cancelled() => None,
                result = call => Some(result),
            };

            // Finalisation: close the modal and free the slot, whatever the result.
            {
                let mut slot = lock(&slot);
                slot.modal = slot.modal.apply(ModalEvent::Settle).unwrap_or_default();
                slot.pending = None;
            }

            match result {
                _ if lifetime.is_cancelled() => {
                    warn!(entity_kind, %id, %kind, "Control dropped before the mutation settled");
                    MutationOutcome::Abandoned
                }
                Some(Ok(outcome)) => {
                    info!(entity_kind, %id, %kind, "Mutation succeeded");
                    listeners.notify(&outcome);
                    outcome
                }
                Some(Err(e)) => {
                    warn!(entity_kind, %id, %kind, error = %e, "Mutation failed");
                    MutationOutcome::Failed(e)
                }
                None => MutationOutcome::Abandoned,
            }
        });

        PendingMutation { kind, handle }
    }
}

impl<T: Entity, C: ?Sized> Drop for ResourceActionControl<T, C> {
    fn drop(&mut self) {
        if let Some(kind) = lock(&self.slot).pending {
            debug!(entity_kind = T::KIND, id = self.entity.entity_id(), %kind, "Dropped with a mutation in flight");
        }
        self.lifetime.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Tag, TagInput};
    use crate::service::mock::{create_mock_client, expect_delete, expect_update, MockService};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tag() -> Tag {
        Tag::new("t1", "red", "#ff0000")
    }

    #[tokio::test]
    async fn test_second_submit_is_refused_while_pending() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);
        let control = ResourceActionControl::new(tag(), client);

        control.open_delete().unwrap();
        let pending = control.submit_delete().unwrap();

        // The request reaches the service but stays unanswered.
        let (id, respond_to) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(id, "t1");
        assert!(!pending.is_finished());
        assert_eq!(control.pending(), Some(MutationKind::Delete));
        assert_eq!(control.modal_state(), ModalState::ConfirmingDelete);
        assert_eq!(
            control.submit_delete().unwrap_err(),
            ControlError::MutationInFlight(MutationKind::Delete)
        );

        respond_to.send(Ok(())).unwrap();
        assert_eq!(pending.outcome().await, MutationOutcome::Deleted("t1".into()));
        assert_eq!(control.pending(), None);
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_while_pending_keeps_the_mutation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let (client, mut receiver) = create_mock_client::<Tag>(10);
        let control = ResourceActionControl::new(tag(), client).on_delete(move |_: String| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        control.open_delete().unwrap();
        let pending = control.submit_delete().unwrap();
        let (_, respond_to) = expect_delete(&mut receiver).await.unwrap();

        assert_eq!(control.cancel(), ModalState::None);
        respond_to.send(Ok(())).unwrap();

        assert_eq!(pending.outcome().await, MutationOutcome::Deleted("t1".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(control.modal_state(), ModalState::None);
    }

    #[tokio::test]
    async fn test_settle_closes_a_dialog_reopened_meanwhile() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);
        let control = ResourceActionControl::new(tag(), client);

        control.open_edit().unwrap();
        let pending = control.submit_edit(tag().initial_values()).unwrap();
        let (_, _, respond_to) = expect_update(&mut receiver).await.unwrap();

        control.cancel();
        assert_eq!(control.open_delete().unwrap(), ModalState::ConfirmingDelete);

        respond_to.send(Ok(MutationResult::with_data(tag()))).unwrap();
        assert_eq!(pending.outcome().await, MutationOutcome::Updated(Some(tag())));
        assert_eq!(control.modal_state(), ModalState::None);
        assert_eq!(control.pending(), None);
    }

    #[tokio::test]
    async fn test_update_without_data_skips_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut mock = MockService::<Tag>::new();
        mock.expect_update("t1").return_result(MutationResult::empty());

        let control = ResourceActionControl::new(tag(), mock.client()).on_update(move |_: Tag| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        control.open_edit().unwrap();
        let payload = TagInput {
            tag_name: "blue".into(),
            tag_color: "#0000ff".into(),
        };
        let outcome = control.submit_edit(payload).unwrap().outcome().await;

        assert_eq!(outcome, MutationOutcome::Updated(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(control.modal_state(), ModalState::None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_affordance_follows_the_modal() {
        let mock = MockService::<Tag>::new();
        let control = ResourceActionControl::new(tag(), mock.client()).placement(Placement::InList);

        assert_eq!(control.entity().entity_id(), "t1");
        assert_eq!(control.variant(), ButtonVariant::Icon);
        assert_eq!(
            control.entries().iter().map(|e| e.label).collect::<Vec<_>>(),
            vec!["Update", "Delete"]
        );
        assert!(control.edit_form().is_none());
        assert!(control.delete_prompt().is_none());

        control.trigger(ActionKind::Update).unwrap();
        let form = control.edit_form().unwrap();
        assert_eq!(form.title, "Update the tag");
        assert_eq!(form.initial_values.tag_name, "red");
        assert!(form.editing);
        assert!(control.delete_prompt().is_none());

        control.trigger(ActionKind::Delete).unwrap();
        assert!(control.edit_form().is_none());
        assert_eq!(
            control.delete_prompt().unwrap().text,
            "Do you want to delete this tag?"
        );
        assert_eq!(mock.received(), 0);
    }
}
