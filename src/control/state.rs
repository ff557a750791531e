//! # Modal State Machine
//!
//! Which dialog (if any) a [`ResourceActionControl`](super::ResourceActionControl)
//! shows, and the only way that can change.
//!
//! ```text
//!            OpenEdit                 OpenDelete
//!   None ─────────────▶ Editing   None ─────────────▶ ConfirmingDelete
//!     ▲                   │  ▲                          │
//!     └── Cancel/Settle ──┘  └──── OpenEdit/OpenDelete ─┘
//! ```
//!
//! `Settle` is the finalisation step every submission ends with. It closes
//! the modal whatever the mutation's result was: a failed edit closes its
//! drawer exactly like a successful one, and nothing stays stuck open.

use super::error::ControlError;

/// The dialog currently shown by a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Editing,
    ConfirmingDelete,
}

/// Inputs of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    OpenEdit,
    OpenDelete,
    Cancel,
    SubmitEdit,
    SubmitDelete,
    /// A submission finished (success or failure).
    Settle,
}

impl ModalState {
    /// Pure transition function.
    ///
    /// Submissions keep the dialog open while the mutation is in flight; the
    /// caller is expected to follow every accepted submission with `Settle`.
    pub fn apply(self, event: ModalEvent) -> Result<ModalState, ControlError> {
        use ModalEvent::*;
        use ModalState::*;

        match (self, event) {
            (_, Cancel) | (_, Settle) => Ok(None),
            (None | ConfirmingDelete, OpenEdit) => Ok(Editing),
            (None | Editing, OpenDelete) => Ok(ConfirmingDelete),
            (Editing, SubmitEdit) => Ok(Editing),
            (ConfirmingDelete, SubmitDelete) => Ok(ConfirmingDelete),
            (from, event) => Err(ControlError::InvalidTransition { from, event }),
        }
    }

    pub fn is_open(self) -> bool {
        self != ModalState::None
    }
}
