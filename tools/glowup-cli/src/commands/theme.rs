//! Dark-mode preference commands.

use anyhow::Result;
use glowup_commerce::theme::{Theme, ThemeStore};

use super::{ThemeArgs, ThemeCommand};
use crate::context::Context;

/// Run the theme command.
pub async fn run(args: ThemeArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut theme = ThemeStore::load(&storage);

    let current = match args.command.unwrap_or(ThemeCommand::Show) {
        ThemeCommand::Show => theme.theme(),
        ThemeCommand::Toggle => theme.toggle()?,
        ThemeCommand::Dark => theme.set(Theme::Dark)?,
        ThemeCommand::Light => theme.set(Theme::Light)?,
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "theme": current }));
    } else {
        ctx.output.kv("Theme", current.as_str());
    }

    Ok(())
}
