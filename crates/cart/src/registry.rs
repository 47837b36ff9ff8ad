//! The customer's cart.
//!
//! Adding an item is a three-step flow: [`OrderItemRegistry::begin_add`]
//! validates the request and raises the in-flight flag, the caller runs the
//! product lookup, and [`OrderItemRegistry::complete_add`] writes the result.
//! [`OrderItemRegistry::add`] runs all three. Only one lookup may be
//! outstanding at a time.

use std::time::Duration;

use shipdash_core::entity::position_of;
use shipdash_core::{Entity, ItemId};

use crate::error::{CartError, CartResult};
use crate::item::{ItemCandidate, OrderItem};
use crate::lookup::{LookupError, ProductDetails, ProductLookup};

/// Ticket for an outstanding lookup.
///
/// Completing a ticket that was cancelled (or superseded) is ignored.
#[derive(Debug)]
#[must_use = "an outstanding lookup keeps the cart busy until completed or cancelled"]
pub struct PendingAdd {
    ticket: u64,
    candidate: ItemCandidate,
}

impl PendingAdd {
    pub fn source_url(&self) -> &str {
        self.candidate.source_url.trim()
    }
}

#[derive(Debug, Default)]
pub struct OrderItemRegistry {
    items: Vec<OrderItem>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl OrderItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    pub fn lookup_in_progress(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn begin_add(&mut self, candidate: ItemCandidate) -> CartResult<PendingAdd> {
        candidate.validate()?;
        if self.in_flight.is_some() {
            return Err(CartError::LookupInProgress);
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(ticket);
        tracing::debug!(ticket, source_url = %candidate.source_url.trim(), "cart: lookup started");

        Ok(PendingAdd { ticket, candidate })
    }

    /// Write the outcome of a lookup.
    ///
    /// Returns `Ok(None)` when the ticket is no longer current; nothing is
    /// written in that case.
    pub fn complete_add(
        &mut self,
        pending: PendingAdd,
        outcome: Result<ProductDetails, LookupError>,
    ) -> CartResult<Option<OrderItem>> {
        if self.in_flight != Some(pending.ticket) {
            tracing::warn!(
                ticket = pending.ticket,
                source_url = %pending.source_url(),
                "cart: ignoring stale lookup result"
            );
            return Ok(None);
        }
        self.finish(pending.candidate, outcome).map(Some)
    }

    /// Clear the in-flight flag and write (or reject) the looked-up item.
    fn finish(
        &mut self,
        candidate: ItemCandidate,
        outcome: Result<ProductDetails, LookupError>,
    ) -> CartResult<OrderItem> {
        self.in_flight = None;

        let details = match outcome.and_then(check_details) {
            Ok(details) => details,
            Err(e) => {
                let source_url = candidate.source_url.trim().to_string();
                tracing::warn!(%source_url, error = %e, "cart: product lookup failed");
                return Err(CartError::lookup_failed(source_url, e.to_string()));
            }
        };

        let item = OrderItem::enriched(ItemId::new(), candidate, details);
        tracing::info!(
            item_id = %item.id(),
            name = %item.name(),
            quantity = item.quantity(),
            "cart: item added"
        );
        self.items.push(item.clone());
        Ok(item)
    }

    /// Drop the outstanding ticket, if any. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        let cancelled = self.in_flight.take();
        if let Some(ticket) = cancelled {
            tracing::debug!(ticket, "cart: lookup cancelled");
        }
        cancelled.is_some()
    }

    /// Validate, look up and append in one go.
    ///
    /// Dropping the returned future before it resolves cancels the lookup.
    pub async fn add<L>(&mut self, candidate: ItemCandidate, lookup: &L) -> CartResult<OrderItem>
    where
        L: ProductLookup + ?Sized,
    {
        self.run_add(candidate, lookup, None).await
    }

    /// Like [`add`](Self::add), failing with `LookupFailed` once `timeout` elapses.
    pub async fn add_within<L>(
        &mut self,
        candidate: ItemCandidate,
        lookup: &L,
        timeout: Duration,
    ) -> CartResult<OrderItem>
    where
        L: ProductLookup + ?Sized,
    {
        self.run_add(candidate, lookup, Some(timeout)).await
    }

    async fn run_add<L>(
        &mut self,
        candidate: ItemCandidate,
        lookup: &L,
        timeout: Option<Duration>,
    ) -> CartResult<OrderItem>
    where
        L: ProductLookup + ?Sized,
    {
        let PendingAdd { ticket, candidate } = self.begin_add(candidate)?;
        let source_url = candidate.source_url.trim().to_string();
        let guard = InFlight {
            registry: self,
            ticket,
        };

        let outcome = match timeout {
            None => lookup.lookup(&source_url).await,
            Some(limit) => tokio::time::timeout(limit, lookup.lookup(&source_url))
                .await
                .unwrap_or_else(|_| {
                    let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                    Err(LookupError::TimedOut(millis))
                }),
        };

        // The guard holds `&mut self` across the await, so the ticket is still current.
        guard.registry.finish(candidate, outcome)
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn remove(&mut self, id: ItemId) -> Option<OrderItem> {
        let index = position_of(&self.items, id)?;
        let removed = self.items.remove(index);
        tracing::info!(item_id = %id, "cart: item removed");
        Some(removed)
    }

    /// Change an item's quantity. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ItemId, quantity: u32) -> CartResult<()> {
        if quantity == 0 {
            return Err(CartError::invalid_input("quantity must be at least 1"));
        }
        if let Some(index) = position_of(&self.items, id) {
            self.items[index].set_quantity(quantity);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

fn check_details(details: ProductDetails) -> Result<ProductDetails, LookupError> {
    if !details.unit_price.is_finite() || details.unit_price < 0.0 {
        return Err(LookupError::Malformed(format!(
            "unit price {} is not a non-negative amount",
            details.unit_price
        )));
    }
    Ok(details)
}

/// Clears the in-flight flag if the add future is dropped mid-lookup.
struct InFlight<'a> {
    registry: &'a mut OrderItemRegistry,
    ticket: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.registry.in_flight == Some(self.ticket) {
            self.registry.in_flight = None;
            tracing::debug!(ticket = self.ticket, "cart: lookup abandoned");
        }
    }
}
