//! Itemized shipping-cost calculator.
//!
//! All amounts are `f64` and never rounded here; rounding to cents belongs to
//! whoever displays the breakdown ([`PricingBreakdown::rounded`]).

use serde::{Deserialize, Serialize};

use shipdash_core::ValueObject;

use crate::item::OrderItem;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub items_total: f64,
    pub service_fee: f64,
    pub tax: f64,
    pub shipping_estimate: f64,
    pub total: f64,
}

impl ValueObject for PricingBreakdown {}

impl PricingBreakdown {
    /// Copy with every field rounded to two decimals, for display only.
    pub fn rounded(&self) -> Self {
        Self {
            items_total: round_cents(self.items_total),
            service_fee: round_cents(self.service_fee),
            tax: round_cents(self.tax),
            shipping_estimate: round_cents(self.shipping_estimate),
            total: round_cents(self.total),
        }
    }
}

impl core::fmt::Display for PricingBreakdown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "items {:.2} + service fee {:.2} + tax {:.2} + shipping {:.2} = {:.2}",
            self.items_total, self.service_fee, self.tax, self.shipping_estimate, self.total
        )
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Rates and toggles for the calculator.
///
/// The default reproduces the storefront's published rules: 5% service fee,
/// flat 8% tax, shipping from a 10 (domestic US) or 30 base rate plus 5 per
/// unit after the first. With an empty cart the per-unit term goes to -5
/// unless `clamp_empty_cart_shipping` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub service_fee_rate: f64,
    pub tax_rate: f64,
    pub domestic_country: String,
    pub domestic_base_rate: f64,
    pub international_base_rate: f64,
    pub per_extra_item_rate: f64,
    pub clamp_empty_cart_shipping: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            service_fee_rate: 0.05,
            tax_rate: 0.08,
            domestic_country: "US".to_string(),
            domestic_base_rate: 10.0,
            international_base_rate: 30.0,
            per_extra_item_rate: 5.0,
            clamp_empty_cart_shipping: false,
        }
    }
}

impl PricingPolicy {
    pub fn base_rate(&self, destination_country: &str) -> f64 {
        if destination_country
            .trim()
            .eq_ignore_ascii_case(self.domestic_country.trim())
        {
            self.domestic_base_rate
        } else {
            self.international_base_rate
        }
    }

    pub fn shipping_estimate(&self, total_quantity: u64, destination_country: &str) -> f64 {
        // Signed on purpose: an empty cart gives -1 extra units.
        let mut extra_units = total_quantity as f64 - 1.0;
        if self.clamp_empty_cart_shipping {
            extra_units = extra_units.max(0.0);
        }
        self.base_rate(destination_country) + extra_units * self.per_extra_item_rate
    }

    /// Price the cart. The result does not depend on item order.
    pub fn compute(&self, items: &[OrderItem], destination_country: &str) -> PricingBreakdown {
        let total_quantity: u64 = items.iter().map(|i| u64::from(i.quantity())).sum();

        // Float addition is not associative; sum in a canonical order.
        let mut line_totals: Vec<f64> = items.iter().map(OrderItem::line_total).collect();
        line_totals.sort_by(f64::total_cmp);
        let items_total: f64 = line_totals.iter().sum();

        let service_fee = items_total * self.service_fee_rate;
        let tax = items_total * self.tax_rate;
        let shipping_estimate = self.shipping_estimate(total_quantity, destination_country);

        let breakdown = PricingBreakdown {
            items_total,
            service_fee,
            tax,
            shipping_estimate,
            total: items_total + service_fee + tax + shipping_estimate,
        };
        tracing::trace!(
            items = items.len(),
            total_quantity,
            destination_country,
            total = breakdown.total,
            "pricing: computed"
        );
        breakdown
    }
}

/// Price the cart with the default policy.
pub fn compute(items: &[OrderItem], destination_country: &str) -> PricingBreakdown {
    PricingPolicy::default().compute(items, destination_country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures::item;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_breakdown(b: &PricingBreakdown, expected: [f64; 5]) {
        assert_close(b.items_total, expected[0]);
        assert_close(b.service_fee, expected[1]);
        assert_close(b.tax, expected[2]);
        assert_close(b.shipping_estimate, expected[3]);
        assert_close(b.total, expected[4]);
    }

    #[test]
    fn single_line_to_us() {
        let b = compute(&[item(20.0, 2)], "US");
        assert_breakdown(&b, [40.0, 2.0, 3.2, 15.0, 60.2]);
    }

    #[test]
    fn two_lines_abroad() {
        let b = compute(&[item(15.0, 1), item(25.0, 3)], "DE");
        assert_breakdown(&b, [90.0, 4.5, 7.2, 45.0, 146.7]);
    }

    #[test]
    fn empty_cart_to_us_keeps_reduced_shipping() {
        let b = compute(&[], "US");
        assert_breakdown(&b, [0.0, 0.0, 0.0, 5.0, 5.0]);
    }

    #[test]
    fn clamped_policy_charges_base_rate_for_empty_cart() {
        let policy = PricingPolicy {
            clamp_empty_cart_shipping: true,
            ..PricingPolicy::default()
        };
        assert_close(policy.compute(&[], "US").shipping_estimate, 10.0);
        assert_close(policy.compute(&[item(1.0, 3)], "US").shipping_estimate, 20.0);
    }

    #[test]
    fn country_match_ignores_case_and_padding() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.base_rate(" us "), 10.0);
        assert_eq!(policy.base_rate("USA"), 30.0);
        assert_eq!(policy.base_rate(""), 30.0);
    }

    #[test]
    fn tax_is_flat_regardless_of_destination() {
        let items = [item(100.0, 1)];
        assert_eq!(compute(&items, "US").tax, compute(&items, "JP").tax);
    }

    #[test]
    fn repeated_computation_does_not_drift() {
        let items = [item(19.99, 3), item(0.1, 7), item(4.35, 1)];
        let first = compute(&items, "GB");
        for _ in 0..100 {
            assert_eq!(compute(&items, "GB"), first);
        }
    }

    #[test]
    fn rounding_only_at_presentation() {
        let b = compute(&[item(0.333, 1)], "US");
        assert_ne!(b.items_total, 0.33);
        assert_eq!(b.rounded().items_total, 0.33);
        assert_eq!(
            compute(&[item(20.0, 2)], "US").to_string(),
            "items 40.00 + service fee 2.00 + tax 3.20 + shipping 15.00 = 60.20"
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_lines() -> impl Strategy<Value = Vec<(f64, u32)>> {
            proptest::collection::vec((0.0f64..500.0, 1u32..20), 0..12)
        }

        proptest! {
            /// Property: compute is invariant under permutation of items.
            #[test]
            fn compute_ignores_item_order(
                lines in any_lines(),
                seed in any::<u64>(),
                domestic in any::<bool>(),
            ) {
                let items: Vec<OrderItem> = lines.iter().map(|&(p, q)| item(p, q)).collect();
                let mut shuffled = items.clone();
                // Deterministic Fisher-Yates driven by the seed.
                let mut state = seed;
                for i in (1..shuffled.len()).rev() {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    let j = (state >> 33) as usize % (i + 1);
                    shuffled.swap(i, j);
                }

                let country = if domestic { "US" } else { "FR" };
                prop_assert_eq!(compute(&items, country), compute(&shuffled, country));
            }

            /// Property: the total is the sum of its parts.
            #[test]
            fn total_is_sum_of_parts(lines in any_lines()) {
                let items: Vec<OrderItem> = lines.iter().map(|&(p, q)| item(p, q)).collect();
                let b = compute(&items, "US");
                let parts = b.items_total + b.service_fee + b.tax + b.shipping_estimate;
                prop_assert!((b.total - parts).abs() < 1e-9);
            }
        }
    }
}
