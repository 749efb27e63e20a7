//! Cart commands.

use anyhow::{anyhow, bail, Result};
use glowup_cache::FileStore;
use glowup_commerce::catalog::{find_service, PRICE_LIST};
use glowup_commerce::notify::ToastQueue;
use glowup_commerce::{CartItemId, CartStore};

use super::{AlreadyReported, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut store = CartStore::initialize_in(&storage, &ctx.toasts, ctx.currency()?);

    let result = match args.command.unwrap_or(CartCommand::List) {
        CartCommand::List => {
            show_cart(&store, ctx);
            Ok(())
        }
        CartCommand::Add { title, price, image } => store
            .add_displayed(&title, &price, &image)
            .map(|id| ctx.output.debug(&format!("Added item {id}")))
            // The store already raised a toast explaining why.
            .map_err(|_| anyhow::Error::new(AlreadyReported)),
        CartCommand::AddService { name } => add_service(&mut store, &name, ctx),
        CartCommand::Remove { id } => remove(&mut store, &id, ctx),
    };

    ctx.flush_toasts();
    result
}

fn add_service(
    store: &mut CartStore<&FileStore, &ToastQueue>,
    name: &str,
    ctx: &Context,
) -> Result<()> {
    let service = find_service(name).ok_or_else(|| {
        let known: Vec<&str> = PRICE_LIST
            .iter()
            .flat_map(|c| c.services.iter().map(|s| s.name))
            .collect();
        anyhow!("Unknown service: {name}. Available: {}", known.join(", "))
    })?;

    let id = store.add_item(service.to_cart_item(store.currency())?)?;
    ctx.output.debug(&format!("Added item {id}"));
    Ok(())
}

fn remove(store: &mut CartStore<&FileStore, &ToastQueue>, id: &str, ctx: &Context) -> Result<()> {
    let id: CartItemId = match id.parse() {
        Ok(id) => id,
        Err(_) => bail!("Invalid item id: {id}"),
    };

    if store.remove_item(id).is_none() {
        ctx.output.debug(&format!("No item with id {id}; cart unchanged"));
    }
    Ok(())
}

/// Print the cart contents and total.
pub fn show_cart(store: &CartStore<&FileStore, &ToastQueue>, ctx: &Context) {
    let snapshot = store.snapshot();

    if ctx.output.is_json() {
        ctx.output.json(&snapshot);
        return;
    }

    match store.badge() {
        Some(count) => ctx.output.header(&format!("Cart ({count})")),
        None => ctx.output.header("Cart"),
    }

    if snapshot.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [14, 28, 10];
    ctx.output.table_row(&["ID", "ITEM", "PRICE"], &widths);
    for item in &snapshot.items {
        let id = item.id.to_string();
        let price = item.price.display();
        ctx.output.table_row(&[&id, &item.title, &price], &widths);
    }
    ctx.output.total(snapshot.total);
}
