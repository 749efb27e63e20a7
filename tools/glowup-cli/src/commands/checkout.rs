//! Review and confirm the cart.

use anyhow::Result;
use dialoguer::Confirm;
use glowup_commerce::CartStore;

use super::{AlreadyReported, CheckoutArgs};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut store = CartStore::initialize_in(&storage, &ctx.toasts, ctx.currency()?);

    let review = match store.begin_checkout() {
        Ok(review) => review.clone(),
        Err(e) => {
            // The store already raised a toast explaining why.
            tracing::debug!("checkout not started: {e}");
            ctx.flush_toasts();
            return Err(AlreadyReported.into());
        }
    };

    if !ctx.output.is_json() {
        ctx.output.header("Checkout");
        let widths = [28, 10];
        for item in review.items() {
            let price = item.price.display();
            ctx.output.table_row(&[&item.title, &price], &widths);
        }
        ctx.output.total(review.total());
    }

    if !args.yes {
        println!();
        let confirmed = Confirm::new()
            .with_prompt("Confirm order?")
            .default(true)
            .interact()?;

        if !confirmed {
            store.cancel_checkout()?;
            ctx.output.warn("Checkout cancelled; your cart is unchanged");
            return Ok(());
        }
    }

    let order = store.confirm_checkout()?;
    ctx.flush_toasts();

    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        ctx.output.kv("Items", &order.items.len().to_string());
        ctx.output.kv("Paid", &order.total.display());
        ctx.output.kv(
            "Confirmed at",
            &order.confirmed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
    }

    Ok(())
}
