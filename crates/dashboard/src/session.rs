//! One customer's dashboard session.

use chrono::NaiveDate;

use shipdash_cart::{
    CartResult, ItemCandidate, OrderItem, OrderItemRegistry, PricingBreakdown, ProductLookup,
};
use shipdash_core::{ItemId, OrderId};
use shipdash_orders::{MultiOrderTimelineController, OrderStatus, OrderTimelineEntry};

use crate::config::DashboardConfig;
use crate::snapshot::{ActiveOrderView, DashboardSnapshot};

/// Owns the order carousel, the cart and the product lookup for one view.
///
/// All state is transient; a new session starts from scratch.
pub struct DashboardSession<L> {
    config: DashboardConfig,
    orders: MultiOrderTimelineController,
    cart: OrderItemRegistry,
    lookup: L,
    destination_country: String,
}

impl<L: ProductLookup> DashboardSession<L> {
    pub fn new(config: DashboardConfig, lookup: L) -> Self {
        let destination_country = config.destination_country.clone();
        Self {
            config,
            orders: MultiOrderTimelineController::new(),
            cart: OrderItemRegistry::new(),
            lookup,
            destination_country,
        }
    }

    pub fn orders(&self) -> &MultiOrderTimelineController {
        &self.orders
    }

    /// Navigation handle for the carousel buttons.
    pub fn orders_mut(&mut self) -> &mut MultiOrderTimelineController {
        &mut self.orders
    }

    pub fn cart(&self) -> &OrderItemRegistry {
        &self.cart
    }

    /// Start tracking an order using the configured timeline mode.
    pub fn track_order(
        &mut self,
        name: impl Into<String>,
        date: NaiveDate,
        status: OrderStatus,
    ) -> OrderId {
        let id = OrderId::new();
        self.orders.add(OrderTimelineEntry::with_mode(
            id,
            name,
            date,
            status,
            self.config.timeline_mode,
        ));
        id
    }

    /// Add a product to the cart, bounded by the configured lookup timeout.
    pub async fn add_item(&mut self, candidate: ItemCandidate) -> CartResult<OrderItem> {
        self.cart
            .add_within(candidate, &self.lookup, self.config.lookup_timeout)
            .await
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<OrderItem> {
        self.cart.remove(id)
    }

    pub fn update_quantity(&mut self, id: ItemId, quantity: u32) -> CartResult<()> {
        self.cart.update_quantity(id, quantity)
    }

    pub fn set_destination(&mut self, country: impl Into<String>) {
        self.destination_country = country.into().trim().to_ascii_uppercase();
        tracing::debug!(country = %self.destination_country, "dashboard: destination changed");
    }

    /// Full-precision breakdown for the current cart and destination.
    pub fn pricing(&self) -> PricingBreakdown {
        self.config
            .pricing
            .compute(self.cart.items(), &self.destination_country)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            active_order: ActiveOrderView::from_controller(&self.orders),
            order_count: self.orders.len(),
            cart: self.cart.items().to_vec(),
            lookup_in_progress: self.cart.lookup_in_progress(),
            destination_country: self.destination_country.clone(),
            pricing: self.pricing().rounded(),
        }
    }
}
