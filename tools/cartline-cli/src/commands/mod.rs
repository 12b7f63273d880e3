//! CLI command implementations.

pub mod apply;
pub mod clear_code;
pub mod show;

use std::fmt;

use clap::Args;

use crate::config::DisplayConfig;
use crate::context::{Context, Page};
use crate::output::Output;

/// Cart file selection shared by every command.
#[derive(Args)]
pub struct CartArgs {
    /// Cart file (JSON array of line items).
    #[arg(long, default_value = "cart.json")]
    pub cart: String,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub cart: CartArgs,
}

/// Arguments for the apply command.
#[derive(Args)]
pub struct ApplyArgs {
    /// Discount code to apply.
    pub code: String,

    #[command(flatten)]
    pub cart: CartArgs,
}

/// Arguments for the clear-code command.
#[derive(Args)]
pub struct ClearCodeArgs {
    #[command(flatten)]
    pub cart: CartArgs,
}

/// Failure already shown to the user by a notifier.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("already reported")
    }
}

impl std::error::Error for Reported {}

/// Render the page: cart table and summary, or one JSON document.
pub(crate) fn render_page(page: &Page, ctx: &Context) {
    let currency = ctx.config.display.currency;
    let output: &Output = &ctx.output;
    let items = page.cart().items();
    let summary = page.summary();

    if output.is_json() {
        let state = page.discount_state();
        output.json(&serde_json::json!({
            "items": items,
            "totals": page.totals(),
            "discount": state.discount,
            "summary": summary,
            "currency": currency,
        }));
        return;
    }

    output.header(&cart_title(page.cart().item_count()));
    if !items.is_empty() {
        output.cart_table(&items, currency);
    }
    output.summary(&summary, currency);

    if let Some(code) = page.discount_state().code {
        output.kv("Code", &code);
    }
    let (label, url) = next_link(summary.is_empty, &ctx.config.display);
    output.info(&format!("{}: {}", label, url));
}

fn cart_title(item_count: i64) -> String {
    match item_count {
        0 => "Your Cart".to_string(),
        1 => "Your Cart (1 item)".to_string(),
        n => format!("Your Cart ({} items)", n),
    }
}

/// Where the page sends the shopper next.
fn next_link(is_empty: bool, display: &DisplayConfig) -> (&'static str, &str) {
    if is_empty {
        ("Continue Shopping", &display.shop_url)
    } else {
        ("Proceed to checkout", &display.checkout_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_link_follows_cart_state() {
        let display = DisplayConfig {
            checkout_url: "https://shop.example.com/pay".to_string(),
            ..DisplayConfig::default()
        };

        assert_eq!(next_link(false, &display), ("Proceed to checkout", "https://shop.example.com/pay"));
        assert_eq!(next_link(true, &display), ("Continue Shopping", "/shop"));
    }

    #[test]
    fn test_cart_title_counts_quantities() {
        assert_eq!(cart_title(0), "Your Cart");
        assert_eq!(cart_title(1), "Your Cart (1 item)");
        assert_eq!(cart_title(3), "Your Cart (3 items)");
    }
}
