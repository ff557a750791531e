//! Concrete records managed through the console, each implementing [`Entity`](crate::entity::Entity).

pub mod custom_dashboard;
pub mod tag;

pub use custom_dashboard::*;
pub use tag::*;
