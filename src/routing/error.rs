//! Authoring errors of a route table.

use thiserror::Error;

/// A route table that breaks one of the authoring rules.
///
/// These are detected once, when the table is built; a built table always
/// dispatches every path to exactly one outcome.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    #[error("Route table has no catch-all entry")]
    MissingCatchAll,

    #[error("Catch-all entry must be the last entry")]
    CatchAllNotLast,

    #[error("Path {0:?} is declared more than once")]
    DuplicatePath(String),

    #[error("Redirect from {from:?} to {to:?} does not reach a panel")]
    DanglingRedirect { from: String, to: String },

    #[error("Redirect from {0:?} loops")]
    RedirectLoop(String),

    #[error("Unknown panel {panel:?} for path {path:?}")]
    UnknownPanel { path: String, panel: String },

    #[error("Invalid route declaration for {path:?}: {reason}")]
    InvalidDecl { path: String, reason: String },
}
