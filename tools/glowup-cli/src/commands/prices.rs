//! Print the service price list.

use anyhow::Result;
use glowup_commerce::catalog::{PRICE_LIST, PRICE_NOTE};

use crate::context::Context;

/// Run the prices command.
pub async fn run(ctx: &Context) -> Result<()> {
    let currency = ctx.currency()?;

    if ctx.output.is_json() {
        let categories: Vec<_> = PRICE_LIST
            .iter()
            .map(|category| {
                let services: Vec<_> = category
                    .services
                    .iter()
                    .map(|s| serde_json::json!({ "name": s.name, "price": s.price(currency) }))
                    .collect();
                serde_json::json!({ "category": category.name, "services": services })
            })
            .collect();
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Service Price List");
    for category in PRICE_LIST {
        println!();
        ctx.output.info(category.name);
        for service in category.services {
            let price = service.price(currency).display();
            ctx.output.table_row(&[service.name, &price], &[24, 10]);
        }
    }
    println!();
    ctx.output.info(PRICE_NOTE);

    Ok(())
}
