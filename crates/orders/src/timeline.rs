//! Projection of an order status onto the customer-facing timeline.

use serde::{Deserialize, Serialize};

use shipdash_core::ValueObject;

use crate::status::{OrderProgress, OrderStatus};

/// Number of milestones on every timeline.
pub const STEP_COUNT: usize = 6;

/// One milestone as the presentation layer renders it.
///
/// `icon_ref` and `color_class` are opaque tokens for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub label: &'static str,
    pub description: &'static str,
    pub icon_ref: &'static str,
    pub color_class: &'static str,
    pub completed: bool,
}

impl ValueObject for TimelineStep {}

/// How statuses are compared against step thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineMode {
    /// Plain ordinal comparison. A canceled order shows every step completed.
    #[default]
    Legacy,
    /// Canceled orders show no completed steps.
    TerminalAware,
}

struct StepDef {
    label: &'static str,
    description: &'static str,
    icon_ref: &'static str,
    color_class: &'static str,
    threshold: OrderStatus,
}

const STEPS: [StepDef; STEP_COUNT] = [
    StepDef {
        label: "Created",
        description: "Order placed and awaiting purchase",
        icon_ref: "icon-clipboard",
        color_class: "text-slate-500",
        threshold: OrderStatus::Open,
    },
    StepDef {
        label: "Purchased",
        description: "Items bought from the merchant",
        icon_ref: "icon-cart",
        color_class: "text-indigo-500",
        threshold: OrderStatus::PartiallyReceived,
    },
    StepDef {
        label: "Received",
        description: "Packages arrived at our warehouse",
        icon_ref: "icon-warehouse",
        color_class: "text-blue-500",
        threshold: OrderStatus::ReadyForPacking,
    },
    StepDef {
        label: "Packing",
        description: "Consolidating items into one shipment",
        icon_ref: "icon-box",
        color_class: "text-amber-500",
        threshold: OrderStatus::PackingInProgress,
    },
    StepDef {
        label: "Shipped",
        description: "Handed over to the carrier",
        icon_ref: "icon-truck",
        color_class: "text-orange-500",
        threshold: OrderStatus::PartiallyShipped,
    },
    StepDef {
        label: "Delivered",
        description: "Shipment delivered to the destination",
        icon_ref: "icon-check",
        color_class: "text-green-500",
        threshold: OrderStatus::Completed,
    },
];

/// Project a status with the legacy ordinal rule.
pub fn project(status: OrderStatus) -> [TimelineStep; STEP_COUNT] {
    project_with(status, TimelineMode::Legacy)
}

pub fn project_with(status: OrderStatus, mode: TimelineMode) -> [TimelineStep; STEP_COUNT] {
    STEPS.each_ref().map(|def| TimelineStep {
        label: def.label,
        description: def.description,
        icon_ref: def.icon_ref,
        color_class: def.color_class,
        completed: reaches(status, def.threshold, mode),
    })
}

fn reaches(status: OrderStatus, threshold: OrderStatus, mode: TimelineMode) -> bool {
    match mode {
        TimelineMode::Legacy => status.is_at_least(threshold),
        TimelineMode::TerminalAware => match (status.progress(), threshold.progress()) {
            (OrderProgress::InProgress(stage), OrderProgress::InProgress(needed)) => {
                stage >= needed
            }
            _ => false,
        },
    }
}

pub fn completed_count(steps: &[TimelineStep]) -> usize {
    steps.iter().filter(|s| s.completed).count()
}

/// Index of the furthest completed step (`None` if nothing is completed).
pub fn current_step(steps: &[TimelineStep]) -> Option<usize> {
    steps.iter().rposition(|s| s.completed)
}
