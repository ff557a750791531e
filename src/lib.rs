//! # Admin Console Core
//!
//! > **Navigation and per-record actions for the settings section of the admin console.**
//!
//! This crate holds the two pieces of the console that carry real logic:
//!
//! - a hierarchical **route dispatcher** that maps a path to a panel, a
//!   default redirect or the not-found page;
//! - a **resource action control** that runs the edit / delete dialogs of one
//!   record around a remote mutation, with exclusive modal state and a
//!   guaranteed close at the end of every submission.
//!
//! Panel content, form fields, styling, translations and authentication live
//! elsewhere and are reached through narrow interfaces.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Navigation ([`routing`], [`settings`])
//! - **Role**: An immutable, ordered [`RouteTable`](routing::RouteTable). First match
//!   wins; a trailing catch-all guarantees every path selects exactly one entry.
//! - **Key items**: [`RouteTable::dispatch`](routing::RouteTable::dispatch),
//!   [`settings::routes`].
//!
//! ### 2. Record actions ([`control`])
//! - **Role**: The [`ResourceActionControl`](control::ResourceActionControl) and its
//!   [`ModalState`](control::ModalState) machine.
//! - **Key items**: `open_edit`, `open_delete`, `cancel`, `submit_edit`, `submit_delete`.
//!
//! ### 3. The remote side ([`mutation`], [`service`])
//! - **Role**: The [`MutationClient`](mutation::MutationClient) contract, an in-process
//!   implementation of it, and a mock for tests.
//!
//! ### 4. Records ([`entity`], [`model`])
//! - **Role**: The [`Entity`](entity::Entity) trait and the concrete records
//!   (`CustomDashboard`, `Tag`).
//!
//! ### 5. Running it ([`config`], [`lifecycle`], [`telemetry`])
//! - **Role**: TOML configuration, starting and stopping the in-process
//!   services, and the `tracing` subscriber.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Use another route declaration
//! cargo run -- path/to/console.toml
//! ```

pub mod config;
pub mod control;
pub mod entity;
pub mod lifecycle;
pub mod model;
pub mod mutation;
pub mod routing;
pub mod service;
pub mod settings;
pub mod telemetry;
