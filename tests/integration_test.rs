use brew_storefront::checkout::CheckoutError;
use brew_storefront::config::Config;
use brew_storefront::flag_actor::FlagError;
use brew_storefront::lifecycle::Storefront;
use brew_storefront::model::{
    CartItem, CartLineKey, FlagKey, MenuItem, MenuItemId, OrderId, OrderStatus, PaymentMethod,
};
use brew_storefront::persistence::{JsonFileStorage, MemoryStorage};
use brew_storefront::tracking::TrackingOutcome;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn shop() -> Storefront {
    Storefront::with_storage(&Config::default(), Arc::new(MemoryStorage::new()))
}

fn line(id: u32, price: f64) -> CartItem {
    CartItem::new(MenuItem::new(id, format!("Blend {id}"), "Coffee", price), 1, vec![]).unwrap()
}

async fn ten_percent_over_five(shop: &Storefront) {
    shop.flags.set(FlagKey::PromotionDiscountType, "percentage".into()).await.unwrap();
    shop.flags.set(FlagKey::PromotionDiscount, 10.0.into()).await.unwrap();
    shop.flags.set(FlagKey::PromotionDiscountMinCart, 5.0.into()).await.unwrap();
}

/// Full visit: promotion, loyalty points applied once, totals as expected.
#[tokio::test]
async fn test_checkout_quote_with_promotion_and_loyalty() {
    let shop = shop();
    ten_percent_over_five(&shop).await;
    shop.flags.set(FlagKey::LoyaltyPoints, true.into()).await.unwrap();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();
    shop.cart.add_item(line(11, 3.75)).await.unwrap();

    let mut checkout = shop.checkout();
    let quote = checkout.quote().await.unwrap();
    assert_eq!(quote.breakdown.subtotal, 8.00);
    assert_eq!(quote.breakdown.promotion_discount, 0.80);
    assert_eq!(quote.breakdown.total, 7.20);
    assert_eq!(quote.loyalty_points_available, 150);

    let discount = checkout.apply_loyalty_points().await.unwrap();
    assert_eq!(discount, 1.50);
    let quote = checkout.quote().await.unwrap();
    assert_eq!(quote.breakdown.loyalty_discount, 1.50);
    assert_eq!(quote.breakdown.total, 5.70);
    assert_eq!(quote.loyalty_points_available, 0);
    assert!(quote.points_applied);

    // Second apply is a no-op
    checkout.apply_loyalty_points().await.unwrap();
    assert_eq!(checkout.quote().await.unwrap().breakdown.total, 5.70);

    let placed = checkout.place_order(PaymentMethod::ApplePay).await.unwrap();
    assert_eq!(placed.order.total, 5.70);
    assert_eq!(placed.order.loyalty_discount, Some(1.50));
    assert_eq!(placed.order.promotion_applied.as_ref().map(|p| p.discount), Some(0.80));
    assert!(placed.order.loyalty_points_applied());

    // A fresh visit with a zero balance gets nothing
    let mut next_visit = shop.checkout();
    assert_eq!(next_visit.apply_loyalty_points().await.unwrap(), 0.0);
    assert!(!next_visit.points_applied());

    drop(checkout);
    drop(next_visit);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_promotion_needs_minimum_cart_value() {
    let shop = shop();
    ten_percent_over_five(&shop).await;
    shop.cart.add_item(line(10, 4.25)).await.unwrap();

    let quote = shop.checkout().quote().await.unwrap();
    assert_eq!(quote.breakdown.promotion_discount, 0.0);
    assert_eq!(quote.breakdown.total, 4.25);

    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_place_order_without_tracking() {
    let shop = shop();
    let flags = shop.flags.flags().await.unwrap();
    let espresso = shop.menu().cart_item(MenuItemId(1), 2, &["Extra Shot"], &flags).unwrap();
    shop.cart.add_item(espresso).await.unwrap();

    let mut checkout = shop.checkout();
    let placed = checkout.place_order(PaymentMethod::Card).await.unwrap();
    assert!(placed.tracking.is_none());
    assert_eq!(placed.order.status, OrderStatus::ReadyForPickup);
    assert_eq!(placed.order.payment_method, PaymentMethod::Card);
    assert_eq!(placed.order.subtotal, 8.50);
    assert_eq!(placed.order.estimated_pickup_time.as_deref(), Some("15-20 minutes"));
    assert!(placed.order.promotion_applied.is_none());
    assert!(placed.order.id.0.starts_with(OrderId::PREFIX));

    assert!(shop.cart.items().await.unwrap().is_empty());
    assert_eq!(shop.orders.current().await.unwrap(), Some(placed.order.clone()));

    // Online payment off forces pay-in-store; pickup estimate off drops the label
    shop.flags.set(FlagKey::OnlinePayment, false.into()).await.unwrap();
    shop.flags.set(FlagKey::EstimatedPickupTime, false.into()).await.unwrap();
    let flags = shop.flags.flags().await.unwrap();
    let macchiato = shop.menu().cart_item(MenuItemId(2), 1, &[], &flags).unwrap();
    shop.cart.add_item(macchiato).await.unwrap();
    let second = checkout.place_order(PaymentMethod::Card).await.unwrap();
    assert_eq!(second.order.payment_method, PaymentMethod::InStore);
    assert!(second.order.estimated_pickup_time.is_none());

    let history = shop.orders.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.order.id);
    assert_eq!(history[1].id, placed.order.id);
    assert!(history[0].id > history[1].id);

    drop(checkout);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_rejections() {
    let shop = shop();
    let mut checkout = shop.checkout();

    let err = checkout.place_order(PaymentMethod::Card).await.unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
    assert!(shop.orders.history().await.unwrap().is_empty());

    let err = checkout.apply_loyalty_points().await.unwrap_err();
    assert_eq!(err, CheckoutError::LoyaltyDisabled);
    assert_eq!(shop.orders.loyalty_points().await.unwrap(), 150);

    drop(checkout);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cart_merges_and_adjusts_lines() {
    let shop = shop();
    let flags = shop.flags.flags().await.unwrap();
    let menu = shop.menu();

    let a = menu.cart_item(MenuItemId(2), 1, &["Oat Milk", "Extra Shot"], &flags).unwrap();
    let b = menu.cart_item(MenuItemId(2), 2, &["Extra Shot", "Oat Milk"], &flags).unwrap();
    let plain = menu.cart_item(MenuItemId(2), 1, &[], &flags).unwrap();
    assert_eq!(shop.cart.add_item(a.clone()).await.unwrap(), 1);
    assert_eq!(shop.cart.add_item(b).await.unwrap(), 3);
    assert_eq!(shop.cart.add_item(plain).await.unwrap(), 1);
    assert_eq!(shop.cart.items().await.unwrap().len(), 2);

    let key = a.key();
    assert_eq!(shop.cart.increment(key.clone()).await.unwrap(), Some(4));
    assert_eq!(shop.cart.decrement(key.clone()).await.unwrap(), Some(3));

    let plain_key = CartLineKey::plain(MenuItemId(2));
    assert_eq!(shop.cart.decrement(plain_key.clone()).await.unwrap(), None);
    assert_eq!(shop.cart.items().await.unwrap().len(), 1);
    assert!(!shop.cart.remove_item(plain_key).await.unwrap());

    assert_eq!(shop.cart.clear().await.unwrap(), 1);
    assert!(shop.cart.items().await.unwrap().is_empty());

    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_seasonal_item_hidden_until_enabled() {
    let shop = shop();
    let flags = shop.flags.flags().await.unwrap();
    assert_eq!(shop.menu().visible_items(&flags).len(), 2);
    assert!(shop.menu().cart_item(MenuItemId(3), 1, &[], &flags).is_err());

    shop.flags.set(FlagKey::SeasonalMenu, true.into()).await.unwrap();
    let flags = shop.flags.flags().await.unwrap();
    assert_eq!(shop.menu().visible_items(&flags).len(), 3);
    assert!(shop.menu().cart_item(MenuItemId(3), 1, &[], &flags).is_ok());

    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_flag_reset_and_remote_variables() {
    let shop = shop();
    shop.flags.set_by_name("dark-mode", true.into()).await.unwrap();
    shop.flags.set(FlagKey::PromotionalBanner, "Free refills".into()).await.unwrap();
    assert!(shop.flags.set_by_name("espresso-mode", true.into()).await.is_err());

    shop.flags.reset_all().await.unwrap();
    let flags = shop.flags.flags().await.unwrap();
    for flag in FlagKey::ALL {
        assert_eq!(flags.get(flag), flag.default_value());
    }

    let merge = shop
        .flags
        .apply_remote(json!({
            "seasonal-menu": true,
            "promotion-discount": 2.5,
            "promotion-discount-type": "amount",
            "dark-mode": "yes",
            "espresso-mode": true
        }))
        .await
        .unwrap();
    assert_eq!(merge.applied.len(), 3);
    assert_eq!(merge.skipped.len(), 2);
    let flags = shop.flags.flags().await.unwrap();
    assert!(flags.enabled(FlagKey::SeasonalMenu));
    assert!(!flags.enabled(FlagKey::DarkMode));
    assert_eq!(flags.number(FlagKey::PromotionDiscount), 2.5);

    assert!(shop.flags.apply_remote(json!(["seasonal-menu"])).await.is_err());

    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_advance_is_forward_only() {
    let shop = shop();
    shop.flags.set(FlagKey::LiveOrderTracking, true.into()).await.unwrap();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();
    let mut checkout = shop.checkout();
    let placed = checkout.place_order(PaymentMethod::Card).await.unwrap();
    let id = placed.order.id.clone();
    placed.tracking.unwrap().cancel();

    let before = shop.orders.history().await.unwrap();
    let unknown = OrderId::from("ORD0");
    assert!(shop.orders.advance(unknown, OrderStatus::Completed).await.unwrap().is_none());
    assert_eq!(shop.orders.history().await.unwrap(), before);

    let ready = shop.orders.advance(id.clone(), OrderStatus::ReadyForPickup).await.unwrap().unwrap();
    assert_eq!(ready.status, OrderStatus::ReadyForPickup);
    assert!(shop.orders.advance(id.clone(), OrderStatus::Brewing).await.unwrap().is_none());
    assert_eq!(shop.orders.current().await.unwrap().unwrap().status, OrderStatus::ReadyForPickup);
    assert_eq!(shop.orders.find(&id).await.unwrap().unwrap().status, OrderStatus::ReadyForPickup);

    drop(checkout);
    shop.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_live_tracking_walks_order_to_ready() {
    let shop = shop();
    shop.flags.set(FlagKey::LiveOrderTracking, true.into()).await.unwrap();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();

    let mut checkout = shop.checkout();
    let placed = checkout.place_order(PaymentMethod::Card).await.unwrap();
    assert_eq!(placed.order.status, OrderStatus::Preparing);

    let tracking = placed.tracking.unwrap();
    assert_eq!(tracking.order_id(), &placed.order.id);
    assert_eq!(tracking.join().await, TrackingOutcome::Completed);

    let current = shop.orders.current().await.unwrap().unwrap();
    assert_eq!(current.status, OrderStatus::ReadyForPickup);
    assert!(current.status.is_ready());
    assert_eq!(shop.orders.history().await.unwrap()[0].status, OrderStatus::ReadyForPickup);

    drop(checkout);
    shop.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_tracking_keeps_last_status() {
    let shop = shop();
    shop.flags.set(FlagKey::LiveOrderTracking, true.into()).await.unwrap();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();

    let mut checkout = shop.checkout();
    let placed = checkout.place_order(PaymentMethod::Card).await.unwrap();
    let tracking = placed.tracking.unwrap();

    tokio::time::sleep(Duration::from_secs(3)).await;
    tracking.cancel();
    assert_eq!(tracking.join().await, TrackingOutcome::Cancelled { applied: 1 });

    tokio::time::sleep(Duration::from_secs(10)).await;
    let current = shop.orders.current().await.unwrap().unwrap();
    assert_eq!(current.status, OrderStatus::Brewing);

    drop(checkout);
    shop.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_tracking() {
    let shop = shop();
    shop.flags.set(FlagKey::LiveOrderTracking, true.into()).await.unwrap();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();

    let mut checkout = shop.checkout();
    let tracking = checkout.place_order(PaymentMethod::Card).await.unwrap().tracking.unwrap();
    drop(checkout);

    shop.shutdown().await.unwrap();
    assert_eq!(tracking.join().await, TrackingOutcome::Cancelled { applied: 0 });
}

#[tokio::test]
async fn test_snapshots_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();

    let shop = Storefront::with_storage(&config, Arc::new(JsonFileStorage::new(dir.path())));
    shop.flags.set(FlagKey::NutritionInfo, false.into()).await.unwrap();
    shop.orders.set_loyalty_points(420).await.unwrap();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();
    let mut checkout = shop.checkout();
    let placed = checkout.place_order(PaymentMethod::Card).await.unwrap();
    shop.cart.add_item(line(11, 3.75)).await.unwrap();
    drop(checkout);
    shop.shutdown().await.unwrap();

    for key in ["cart-storage", "coffee-shop-feature-flags", "order-storage"] {
        assert!(dir.path().join(format!("{key}.json")).exists(), "{key} not written");
    }

    let shop = Storefront::with_storage(&config, Arc::new(JsonFileStorage::new(dir.path())));
    assert!(!shop.flags.flags().await.unwrap().enabled(FlagKey::NutritionInfo));
    assert_eq!(shop.orders.loyalty_points().await.unwrap(), 420);
    assert_eq!(shop.orders.history().await.unwrap(), vec![placed.order.clone()]);
    let cart = shop.cart.items().await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].unit_price, 3.75);

    shop.orders.clear_current().await.unwrap();
    assert!(shop.orders.current().await.unwrap().is_none());
    assert_eq!(shop.orders.history().await.unwrap().len(), 1);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_snapshot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("coffee-shop-feature-flags.json"), "{not json").unwrap();

    let shop = Storefront::with_storage(&Config::default(), Arc::new(JsonFileStorage::new(dir.path())));
    let flags = shop.flags.flags().await.unwrap();
    assert_eq!(flags.get(FlagKey::NutritionInfo), FlagKey::NutritionInfo.default_value());
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_mistyped_flag_snapshot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let blob = r#"{"nutrition-info":false,"dark-mode":"yes","promotion-discount-type":"bogo"}"#;
    std::fs::write(dir.path().join("coffee-shop-feature-flags.json"), blob).unwrap();

    let shop = Storefront::with_storage(&Config::default(), Arc::new(JsonFileStorage::new(dir.path())));
    let flags = shop.flags.flags().await.unwrap();
    assert!(!flags.enabled(FlagKey::DarkMode));
    assert!(flags.enabled(FlagKey::NutritionInfo));
    assert_eq!(flags.text(FlagKey::PromotionDiscountType), "none");
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_finishes_with_checkout_still_alive() {
    let shop = shop();
    shop.cart.add_item(line(10, 4.25)).await.unwrap();
    let mut checkout = shop.checkout();
    checkout.place_order(PaymentMethod::Card).await.unwrap();

    let finished = tokio::time::timeout(Duration::from_secs(3), shop.shutdown()).await;
    assert!(matches!(finished, Ok(Ok(()))));

    let err = checkout.quote().await.unwrap_err();
    assert!(matches!(err, CheckoutError::Flag(FlagError::ActorCommunicationError(_))));
}
