//! Shipping cart domain module.
//!
//! Line items enter the cart through an external product lookup that turns a
//! pasted product URL into a named, priced, imaged item. The pricing
//! calculator turns the current cart into an itemized cost breakdown.

pub mod error;
pub mod item;
pub mod lookup;
pub mod pricing;
pub mod registry;

pub use error::{CartError, CartResult};
pub use item::{ItemCandidate, OrderItem};
pub use lookup::{
    FailingProductLookup, LookupError, ProductDetails, ProductLookup, StaticProductLookup,
};
pub use pricing::{PricingBreakdown, PricingPolicy, compute};
pub use registry::{OrderItemRegistry, PendingAdd};
