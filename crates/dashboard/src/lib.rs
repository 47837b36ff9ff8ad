//! `shipdash-dashboard`
//!
//! **Responsibility:** composition root for one customer's dashboard view.
//!
//! This crate provides:
//! - Configuration from `SHIPDASH_*` environment variables
//! - A session owning the order carousel, the cart and the product lookup
//! - A serializable snapshot handed to whatever renders the page

pub mod config;
pub mod session;
pub mod snapshot;

pub use config::{ConfigError, DashboardConfig};
pub use session::DashboardSession;
pub use snapshot::{ActiveOrderView, DashboardSnapshot};
