//! Error types for the resource action control.

use thiserror::Error;

use super::state::{ModalEvent, ModalState};
use crate::mutation::MutationKind;

/// Operations a control refuses. None of them touches the mutation client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControlError {
    /// The event is not allowed from the current modal state.
    #[error("Cannot apply {event:?} while {from:?}")]
    InvalidTransition { from: ModalState, event: ModalEvent },

    /// A mutation issued by this control has not settled yet.
    #[error("An {0} is already in flight")]
    MutationInFlight(MutationKind),
}
