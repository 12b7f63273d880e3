//! Remove the stored discount code.

use anyhow::{Context as _, Result};

use super::{render_page, ClearCodeArgs};
use crate::context::Context;

/// Run the clear-code command.
pub async fn run(args: ClearCodeArgs, ctx: &Context) -> Result<()> {
    let page = ctx.open_page(&args.cart.cart).await?;

    let had_code = page.session().stored_code()?.is_some();
    page.session()
        .clear()
        .context("Failed to erase stored discount code")?;

    if had_code {
        ctx.output.success("Discount code removed.");
    } else {
        ctx.output.info("No discount code stored.");
    }

    render_page(&page, ctx);
    Ok(())
}
