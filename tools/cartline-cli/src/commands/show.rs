//! Show the cart page.

use anyhow::Result;

use super::{render_page, ShowArgs};
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let page = ctx.open_page(&args.cart.cart).await?;
    render_page(&page, ctx);
    Ok(())
}
