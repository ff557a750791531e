//! View-models for the "Update / Delete" affordance.
//!
//! The popover button, the edit drawer and the delete dialog are rendered by
//! external adapters. They get everything they need from these types and talk
//! back through the control's operations.

/// What a popover entry does when picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Update,
    Delete,
}

/// One entry of the popover menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub label: &'static str,
    pub action: ActionKind,
}

/// The entries every control offers, in display order.
pub const ENTRIES: [ActionEntry; 2] = [
    ActionEntry {
        label: "Update",
        action: ActionKind::Update,
    },
    ActionEntry {
        label: "Delete",
        action: ActionKind::Delete,
    },
];

/// Where the control is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Inside a list row.
    InList,
    /// On a detail page header.
    #[default]
    Standalone,
}

/// How the popover button is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Icon,
    Toggle,
}

impl Placement {
    pub fn variant(self) -> ButtonVariant {
        match self {
            Placement::InList => ButtonVariant::Icon,
            Placement::Standalone => ButtonVariant::Toggle,
        }
    }
}

/// Everything the edit form adapter needs while the drawer is open.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm<I> {
    pub title: String,
    pub initial_values: I,
    /// Always `true`: the form edits an existing record.
    pub editing: bool,
}

/// Everything the delete confirmation adapter needs while the dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePrompt {
    pub text: String,
}

pub(crate) fn edit_title(kind: &str) -> String {
    format!("Update the {}", kind)
}

pub(crate) fn delete_text(kind: &str) -> String {
    format!("Do you want to delete this {}?", kind)
}
