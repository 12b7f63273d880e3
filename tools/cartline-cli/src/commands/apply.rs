//! Apply a discount code to the cart page.

use anyhow::{bail, Result};
use cartline_commerce::cart::ApplyOutcome;
use cartline_commerce::CommerceError;

use super::{render_page, ApplyArgs, Reported};
use crate::context::Context;

/// Run the apply command.
///
/// The session reports the outcome through its notifier; this only decides
/// the exit status.
pub async fn run(args: ApplyArgs, ctx: &Context) -> Result<()> {
    let page = ctx.open_page(&args.cart.cart).await?;

    let result = page.apply(&args.code).await;
    render_page(&page, ctx);

    match result {
        Ok(ApplyOutcome::Applied(discount)) => {
            ctx.output
                .debug(&format!("{:?} discount of {}", discount.kind, discount.value));
            Ok(())
        }
        Ok(ApplyOutcome::NotFound)
        | Err(CommerceError::EmptyDiscountCode)
        | Err(CommerceError::Lookup(_)) => Err(Reported.into()),
        Ok(ApplyOutcome::Superseded) => bail!("Discount lookup was superseded"),
        Err(e) => Err(e.into()),
    }
}
