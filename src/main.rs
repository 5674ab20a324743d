//! Scripted storefront visit: configure flags, fill the cart, redeem points,
//! place an order and watch it being prepared.

use brew_storefront::config::Config;
use brew_storefront::lifecycle::{setup_tracing, Storefront};
use brew_storefront::model::{FlagKey, MenuItemId, PaymentMethod};
use brew_storefront::tracking::TrackingOutcome;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::load()?;
    info!(?config, "Starting storefront");
    let shop = Storefront::start(&config);

    // Turn on the features this visit shows off
    let span = tracing::info_span!("configure_flags");
    async {
        shop.flags.set(FlagKey::LoyaltyPoints, true.into()).await?;
        shop.flags.set(FlagKey::LiveOrderTracking, true.into()).await?;
        shop.flags.set(FlagKey::PromotionDiscountType, "percentage".into()).await?;
        shop.flags.set(FlagKey::PromotionDiscount, 10.0.into()).await?;
        shop.flags.set(FlagKey::PromotionDiscountMinCart, 5.0.into()).await?;
        shop.flags.set(FlagKey::PromotionalBanner, "10% off orders over $5".into()).await?;
        Ok::<_, brew_storefront::flag_actor::FlagError>(())
    }
    .instrument(span)
    .await?;

    let flags = shop.flags.flags().await?;
    if let Some(banner) = flags.banner() {
        info!(%banner, "Banner");
    }
    for entry in shop.menu().visible_items(&flags) {
        info!(item = %entry.item.name, price = entry.item.price, "On the menu");
    }

    let span = tracing::info_span!("fill_cart");
    async {
        let espresso = shop.menu().cart_item(MenuItemId(1), 2, &["Extra Shot"], &flags)?;
        shop.cart.add_item(espresso).await?;
        let macchiato = shop.menu().cart_item(MenuItemId(2), 1, &[], &flags)?;
        shop.cart.add_item(macchiato).await?;
        Ok::<_, brew_storefront::cart_actor::CartError>(())
    }
    .instrument(span)
    .await?;

    // One customer visit
    {
        let mut checkout = shop.checkout();
        checkout.apply_loyalty_points().await?;
        let quote = checkout.quote().await?;
        info!(
            subtotal = quote.breakdown.subtotal,
            promotion = quote.breakdown.promotion_discount,
            loyalty = quote.breakdown.loyalty_discount,
            total = quote.breakdown.total,
            "Quote"
        );

        let placed = checkout.place_order(PaymentMethod::Card).await?;
        info!(id = %placed.order.id, status = %placed.order.status, "Order confirmed");

        if let Some(tracking) = placed.tracking {
            match tracking.join().await {
                TrackingOutcome::Completed => {}
                other => warn!(?other, "Tracking ended early"),
            }
            if let Some(order) = shop.orders.current().await? {
                info!(
                    id = %order.id,
                    status = %order.status,
                    progress = order.status.progress_percent(),
                    "Ready for pickup"
                );
            }
        }
    }

    shop.shutdown().await?;
    Ok(())
}
