//! `shipdash-core` — shared building blocks for the dashboard core.
//!
//! This crate contains **pure domain** primitives (no IO, no async, no UI).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{ItemId, OrderId};
pub use value_object::ValueObject;
