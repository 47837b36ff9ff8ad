//! Multi-order timeline carousel.
//!
//! The controller owns the tracked orders plus a cursor pointing at the one
//! currently on screen. Navigation is permissive: out-of-range moves and
//! unknown ids are ignored, never reported.

use chrono::NaiveDate;
use serde::Serialize;

use shipdash_core::entity::position_of;
use shipdash_core::{Entity, OrderId};

use crate::status::OrderStatus;
use crate::timeline::{STEP_COUNT, TimelineMode, TimelineStep, project_with};

/// A tracked order together with its projected timeline.
///
/// `steps` is derived from `status` and only changes through `set_status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTimelineEntry {
    id: OrderId,
    name: String,
    date: NaiveDate,
    status: OrderStatus,
    mode: TimelineMode,
    steps: [TimelineStep; STEP_COUNT],
}

impl OrderTimelineEntry {
    pub fn new(id: OrderId, name: impl Into<String>, date: NaiveDate, status: OrderStatus) -> Self {
        Self::with_mode(id, name, date, status, TimelineMode::default())
    }

    pub fn with_mode(
        id: OrderId,
        name: impl Into<String>,
        date: NaiveDate,
        status: OrderStatus,
        mode: TimelineMode,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            status,
            mode,
            steps: project_with(status, mode),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.steps = project_with(status, self.mode);
    }
}

impl Entity for OrderTimelineEntry {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct MultiOrderTimelineController {
    entries: Vec<OrderTimelineEntry>,
    active: Option<usize>,
}

impl MultiOrderTimelineController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given entries, first one active.
    pub fn with_entries(entries: Vec<OrderTimelineEntry>) -> Self {
        let mut controller = Self {
            entries,
            active: None,
        };
        controller.clamp();
        controller
    }

    pub fn entries(&self) -> &[OrderTimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` exactly when there are no entries.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&OrderTimelineEntry> {
        self.active.and_then(|i| self.entries.get(i))
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.active, Some(i) if i > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.active, Some(i) if i + 1 < self.entries.len())
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.active {
            self.active = Some(i.saturating_sub(1));
        }
        self.clamp();
        tracing::debug!(active = ?self.active, "timeline: previous");
    }

    pub fn next(&mut self) {
        if let Some(i) = self.active {
            self.active = Some(i + 1);
        }
        self.clamp();
        tracing::debug!(active = ?self.active, "timeline: next");
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.entries.len() {
            self.active = Some(index);
        }
        self.clamp();
    }

    pub fn select_by_id(&mut self, id: OrderId) {
        match position_of(&self.entries, id) {
            Some(index) => self.active = Some(index),
            None => tracing::debug!(%id, "timeline: select ignored, unknown order"),
        }
        self.clamp();
    }

    /// Append an entry. The selection does not move to it.
    pub fn add(&mut self, entry: OrderTimelineEntry) {
        self.entries.push(entry);
        self.clamp();
    }

    pub fn remove_last(&mut self) -> Option<OrderTimelineEntry> {
        let removed = self.entries.pop();
        self.clamp();
        removed
    }

    /// Change an order's status and re-project its steps. Unknown ids are ignored.
    pub fn update_status(&mut self, id: OrderId, status: OrderStatus) {
        if let Some(index) = position_of(&self.entries, id) {
            self.entries[index].set_status(status);
            tracing::debug!(%id, %status, "timeline: status updated");
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.active = match (self.entries.len(), self.active) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
    }
}
