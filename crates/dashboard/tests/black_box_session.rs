use std::collections::HashMap;

use chrono::NaiveDate;
use shipdash_cart::{
    CartError, FailingProductLookup, ItemCandidate, ProductDetails, StaticProductLookup,
};
use shipdash_core::{Entity, OrderId};
use shipdash_dashboard::{DashboardConfig, DashboardSession};
use shipdash_orders::OrderStatus;

const SHOES: &str = "https://store.example.com/shoes";
const BOOK: &str = "https://store.example.com/book";

fn catalog() -> StaticProductLookup {
    StaticProductLookup::new()
        .with_product(SHOES, ProductDetails::new("Shoes", 15.0, "img/shoes.jpg"))
        .with_product(BOOK, ProductDetails::new("Book", 25.0, "img/book.jpg"))
}

fn config_from(pairs: &[(&str, &str)]) -> DashboardConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    DashboardConfig::from_lookup(|key| env.get(key).cloned()).expect("valid test config")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[tokio::test]
async fn prices_the_cart_for_the_chosen_destination() {
    let mut session = DashboardSession::new(DashboardConfig::default(), catalog());

    session.add_item(ItemCandidate::new(SHOES, 1)).await.unwrap();
    session.add_item(ItemCandidate::new(BOOK, 3)).await.unwrap();
    session.set_destination("de");

    let pricing = session.pricing();
    assert!((pricing.items_total - 90.0).abs() < 1e-9);
    assert!((pricing.shipping_estimate - 45.0).abs() < 1e-9);
    assert!((pricing.total - 146.7).abs() < 1e-9);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.destination_country, "DE");
    assert_eq!(snapshot.pricing.total, 146.7);
    assert_eq!(snapshot.cart.len(), 2);
}

#[tokio::test]
async fn failed_lookup_is_reported_and_cart_kept() {
    let mut session =
        DashboardSession::new(DashboardConfig::default(), FailingProductLookup::default());

    let err = session
        .add_item(ItemCandidate::new("http://x.com", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::LookupFailed { .. }));
    assert!(session.cart().is_empty());
    assert!(!session.snapshot().lookup_in_progress);
}

#[tokio::test]
async fn empty_url_never_reaches_the_lookup() {
    let mut session = DashboardSession::new(DashboardConfig::default(), catalog());
    let err = session.add_item(ItemCandidate::new("  ", 1)).await.unwrap_err();
    assert!(matches!(err, CartError::InvalidInput(_)));
    assert!(session.cart().is_empty());
}

#[test]
fn no_orders_renders_empty_state() {
    let session = DashboardSession::new(DashboardConfig::default(), catalog());
    let snapshot = session.snapshot();

    assert!(snapshot.active_order.is_none());
    assert_eq!(snapshot.order_count, 0);
    assert_eq!(snapshot.pricing.shipping_estimate, 5.0);
}

#[test]
fn carousel_navigation_drives_the_active_view() {
    let mut session = DashboardSession::new(DashboardConfig::default(), catalog());
    let first = session.track_order("First", day(1), OrderStatus::Open);
    let second = session.track_order("Second", day(2), OrderStatus::ReadyToShip);

    let view = session.snapshot().active_order.unwrap();
    assert_eq!(view.id, first);
    assert_eq!((view.position, view.of), (1, 2));
    assert!(!view.has_previous && view.has_next);

    session.orders_mut().next();
    session.orders_mut().next();
    let view = session.snapshot().active_order.unwrap();
    assert_eq!(view.id, second);
    assert_eq!(view.completed_steps, 4);
    assert_eq!(view.current_step, Some(3));

    session.orders_mut().select_by_id(OrderId::new());
    assert_eq!(session.snapshot().active_order.unwrap().id, second);

    session.orders_mut().remove_last();
    session.orders_mut().remove_last();
    session.orders_mut().remove_last();
    assert!(session.snapshot().active_order.is_none());
}

#[test]
fn canceled_order_follows_configured_timeline_mode() {
    let mut legacy = DashboardSession::new(DashboardConfig::default(), catalog());
    legacy.track_order("Refunded", day(3), OrderStatus::Canceled);
    assert_eq!(legacy.snapshot().active_order.unwrap().completed_steps, 6);

    let config = config_from(&[("SHIPDASH_TIMELINE_MODE", "terminal_aware")]);
    let mut aware = DashboardSession::new(config, catalog());
    aware.track_order("Refunded", day(3), OrderStatus::Canceled);
    let view = aware.snapshot().active_order.unwrap();
    assert_eq!(view.completed_steps, 0);
    assert_eq!(view.current_step, None);
}

#[test]
fn clamp_toggle_changes_empty_cart_shipping() {
    let config = config_from(&[("SHIPDASH_CLAMP_EMPTY_SHIPPING", "true")]);
    let session = DashboardSession::new(config, catalog());
    assert_eq!(session.pricing().shipping_estimate, 10.0);
}

#[tokio::test]
async fn removing_an_item_reprices_the_cart() {
    let mut session = DashboardSession::new(DashboardConfig::default(), catalog());
    let shoes = session.add_item(ItemCandidate::new(SHOES, 2)).await.unwrap();
    session.add_item(ItemCandidate::new(BOOK, 1)).await.unwrap();

    session.remove_item(shoes.id());

    let pricing = session.pricing();
    assert!((pricing.items_total - 25.0).abs() < 1e-9);
    assert!((pricing.shipping_estimate - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn snapshot_serializes_to_json() {
    let mut session = DashboardSession::new(DashboardConfig::default(), catalog());
    session.track_order("Spring haul", day(4), OrderStatus::PackingInProgress);
    session
        .add_item(ItemCandidate::new(SHOES, 2).with_instructions("size 42"))
        .await
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&session.snapshot().to_json().unwrap()).unwrap();

    assert_eq!(json["active_order"]["status"], "packing_in_progress");
    assert_eq!(json["active_order"]["steps"].as_array().unwrap().len(), 6);
    assert_eq!(json["active_order"]["steps"][3]["label"], "Packing");
    assert_eq!(json["cart"][0]["instructions"], "size 42");
    assert_eq!(json["pricing"]["total"], 48.9);
    assert_eq!(json["lookup_in_progress"], false);
}

#[tokio::test]
async fn updating_a_quantity_reprices_shipping() {
    let mut session = DashboardSession::new(DashboardConfig::default(), catalog());
    let shoes = session.add_item(ItemCandidate::new(SHOES, 1)).await.unwrap();
    assert!((session.pricing().shipping_estimate - 10.0).abs() < 1e-9);

    session.update_quantity(shoes.id(), 3).unwrap();

    let pricing = session.pricing();
    assert_eq!(session.cart().total_quantity(), 3);
    assert!((pricing.items_total - 45.0).abs() < 1e-9);
    assert!((pricing.shipping_estimate - 20.0).abs() < 1e-9);

    assert!(matches!(
        session.update_quantity(shoes.id(), 0),
        Err(CartError::InvalidInput(_))
    ));
    assert_eq!(session.cart().total_quantity(), 3);
}
