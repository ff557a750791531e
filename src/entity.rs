//! # Entity Trait
//!
//! The `Entity` trait is the contract every administrative record (custom
//! dashboard, tag, ...) implements so that the generic pieces of the console
//! can work with it: the [`ResourceActionControl`](crate::control::ResourceActionControl),
//! the [`MutationClient`](crate::mutation::MutationClient) and the in-process
//! [`ResourceActor`](crate::service::ResourceActor).
//!
//! The console only interprets two things about a record: its identifier and
//! its display label. Everything else is carried opaquely in the concrete type
//! and in its `Input` payload.

use std::fmt::Debug;

/// Trait implemented by every record managed through the console.
///
/// # Associated Types
/// `Input` is the payload the edit form produces and the mutation client
/// sends. A `Tag` entity requires a `TagInput`; you can't hand it a
/// `CustomDashboardInput`.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Payload accepted by create and update operations.
    type Input: Clone + Debug + Send + Sync + 'static;

    /// Human readable resource kind, lower case (e.g. `"custom dashboard"`).
    const KIND: &'static str;

    /// Stable identifier of the record.
    fn entity_id(&self) -> &str;

    /// Label shown to the operator.
    fn label(&self) -> &str;

    /// Initial values for the edit form, taken from this snapshot.
    ///
    /// Optional fields fall back to their empty value so the form never
    /// starts from an undefined field.
    fn initial_values(&self) -> Self::Input;

    /// Build a record from a fresh identifier and its input.
    fn from_input(id: String, input: Self::Input) -> Result<Self, String>;

    /// Apply an update payload to this record.
    fn apply(&mut self, input: Self::Input) -> Result<(), String>;
}
