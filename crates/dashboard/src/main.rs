//! Demo binary: seeds a session with sample orders and cart items, then prints
//! the render snapshot as JSON.

use anyhow::Context;
use chrono::NaiveDate;

use shipdash_cart::{ItemCandidate, ProductDetails, StaticProductLookup};
use shipdash_dashboard::{DashboardConfig, DashboardSession};
use shipdash_orders::OrderStatus;

fn demo_catalog() -> StaticProductLookup {
    StaticProductLookup::new()
        .with_product(
            "https://store.example.com/running-shoes",
            ProductDetails::new("Running shoes", 89.99, "img/running-shoes.jpg"),
        )
        .with_product(
            "https://store.example.com/usb-c-hub",
            ProductDetails::new("USB-C hub", 24.5, "img/usb-c-hub.jpg"),
        )
}

fn date(y: i32, m: u32, d: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).with_context(|| format!("invalid demo date {y}-{m}-{d}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("invalid SHIPDASH_* configuration")?;
    shipdash_observability::tracing::init(config.log_format);

    let mut session = DashboardSession::new(config, demo_catalog());

    session.track_order("Spring haul", date(2024, 3, 2)?, OrderStatus::PartiallyShipped);
    session.track_order("Gadgets", date(2024, 3, 20)?, OrderStatus::ReadyForPacking);
    session.track_order("Returned jacket", date(2024, 2, 11)?, OrderStatus::Canceled);
    session.orders_mut().next();

    session
        .add_item(ItemCandidate::new("https://store.example.com/running-shoes", 1))
        .await
        .context("failed to add demo shoes")?;
    session
        .add_item(
            ItemCandidate::new("https://store.example.com/usb-c-hub", 2)
                .with_instructions("one black, one silver"),
        )
        .await
        .context("failed to add demo hub")?;

    if let Err(e) = session
        .add_item(ItemCandidate::new("https://store.example.com/unknown", 1))
        .await
    {
        tracing::warn!(error = %e, "demo: expected lookup failure");
    }

    tracing::info!(pricing = %session.pricing(), "demo: cart priced");

    let json = session
        .snapshot()
        .to_json()
        .context("failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}
