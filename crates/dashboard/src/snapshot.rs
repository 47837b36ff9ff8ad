//! Render-ready view of a dashboard session.

use chrono::NaiveDate;
use serde::Serialize;

use shipdash_cart::{OrderItem, PricingBreakdown};
use shipdash_core::{Entity, OrderId};
use shipdash_orders::{
    MultiOrderTimelineController, OrderStatus, TimelineStep, completed_count, current_step,
};

/// The order currently shown in the timeline carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveOrderView {
    pub id: OrderId,
    pub name: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub steps: Vec<TimelineStep>,
    pub completed_steps: usize,
    pub current_step: Option<usize>,
    /// 1-based position for "order 2 of 5" captions.
    pub position: usize,
    pub of: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl ActiveOrderView {
    pub(crate) fn from_controller(orders: &MultiOrderTimelineController) -> Option<Self> {
        let index = orders.active_index()?;
        let entry = orders.active()?;
        Some(Self {
            id: entry.id(),
            name: entry.name().to_string(),
            date: entry.date(),
            status: entry.status(),
            status_label: entry.status().label(),
            steps: entry.steps().to_vec(),
            completed_steps: completed_count(entry.steps()),
            current_step: current_step(entry.steps()),
            position: index + 1,
            of: orders.len(),
            has_previous: orders.has_previous(),
            has_next: orders.has_next(),
        })
    }
}

/// Everything the page needs for one render.
///
/// `active_order` is `None` when the customer has no orders; the renderer
/// shows its empty state then. Pricing amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub active_order: Option<ActiveOrderView>,
    pub order_count: usize,
    pub cart: Vec<OrderItem>,
    pub lookup_in_progress: bool,
    pub destination_country: String,
    pub pricing: PricingBreakdown,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
