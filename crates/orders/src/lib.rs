//! Order tracking domain module.
//!
//! This crate contains the order lifecycle status model, the projection of a
//! status onto the customer-facing timeline, and the controller that lets a
//! customer page through several tracked orders. Everything here is
//! deterministic, synchronous domain logic (no IO, no rendering).

pub mod controller;
pub mod status;
pub mod timeline;

pub use controller::{MultiOrderTimelineController, OrderTimelineEntry};
pub use status::{OrderProgress, OrderStatus};
pub use timeline::{
    STEP_COUNT, TimelineMode, TimelineStep, completed_count, current_step, project, project_with,
};
