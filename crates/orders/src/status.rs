use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shipdash_core::DomainError;

/// Order status lifecycle.
///
/// Declaration order is significant: `ordinal()` follows it and every legacy
/// completion check compares ordinals. `Canceled` sits last, so it compares as
/// further along than `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    PartiallyReceived,
    ReadyForPacking,
    PackingInProgress,
    ReadyToShip,
    PartiallyShipped,
    Completed,
    Canceled,
}

/// Tagged view of a status that keeps the terminal case out of the ordinal
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "stage")]
pub enum OrderProgress {
    /// Moving through the lifecycle; the stage is the status ordinal (0..=6).
    InProgress(u8),
    /// Canceled. Not comparable with any progress stage.
    Terminated,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Open,
        OrderStatus::PartiallyReceived,
        OrderStatus::ReadyForPacking,
        OrderStatus::PackingInProgress,
        OrderStatus::ReadyToShip,
        OrderStatus::PartiallyShipped,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            OrderStatus::Open => 0,
            OrderStatus::PartiallyReceived => 1,
            OrderStatus::ReadyForPacking => 2,
            OrderStatus::PackingInProgress => 3,
            OrderStatus::ReadyToShip => 4,
            OrderStatus::PartiallyShipped => 5,
            OrderStatus::Completed => 6,
            OrderStatus::Canceled => 7,
        }
    }

    /// `ordinal(self) >= ordinal(threshold)`.
    pub fn is_at_least(self, threshold: OrderStatus) -> bool {
        self.ordinal() >= threshold.ordinal()
    }

    pub fn progress(self) -> OrderProgress {
        match self {
            OrderStatus::Canceled => OrderProgress::Terminated,
            other => OrderProgress::InProgress(other.ordinal()),
        }
    }

    /// Human-readable label for badges.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::PartiallyReceived => "Partially received",
            OrderStatus::ReadyForPacking => "Ready for packing",
            OrderStatus::PackingInProgress => "Packing in progress",
            OrderStatus::ReadyToShip => "Ready to ship",
            OrderStatus::PartiallyShipped => "Partially shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Stable machine name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::PartiallyReceived => "partially_received",
            OrderStatus::ReadyForPacking => "ready_for_packing",
            OrderStatus::PackingInProgress => "packing_in_progress",
            OrderStatus::ReadyToShip => "ready_to_ship",
            OrderStatus::PartiallyShipped => "partially_shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::unknown("order status", s))
    }
}
