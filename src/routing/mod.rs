//! # Route Dispatcher
//!
//! Maps a requested path to exactly one of: render a panel, redirect, or
//! render the not-found page.
//!
//! A [`RouteTable`] is an ordered list of entries, built once and never
//! modified. [`RouteTable::resolve`] is the pure single-step match (first
//! match wins); [`RouteTable::dispatch`] follows default redirects until a
//! terminal [`Outcome`].
//!
//! ```rust
//! use admin_console::routing::{Outcome, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .redirect("", "parameters")
//!     .panel("parameters", "Parameters")
//!     .not_found()
//!     .build()
//!     .unwrap();
//!
//! let dispatch = table.dispatch("");
//! assert_eq!(dispatch.outcome, Outcome::Render(&"Parameters"));
//! assert_eq!(dispatch.redirects, 1);
//! assert_eq!(table.dispatch("totally_unknown").outcome, Outcome::NotFound);
//! ```

pub mod decl;
pub mod error;
pub mod path;
pub mod table;

pub use decl::RouteDecl;
pub use error::RouteError;
pub use table::{
    Dispatch, Outcome, Resolution, RouteMapping, RouteTable, RouteTableBuilder, RouteTarget,
    CATCH_ALL, MAX_REDIRECTS,
};
