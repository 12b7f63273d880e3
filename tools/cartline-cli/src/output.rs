//! Output formatting for the CLI.

use cartline_commerce::cart::{CartSummary, LineItem, SummaryLineKind};
use cartline_commerce::notify::Notifier;
use cartline_commerce::Currency;
use console::style;

/// Longest product name shown in the cart table.
const NAME_WIDTH: usize = 15;

/// Column widths of the cart table.
const CART_COLUMNS: [usize; 5] = [18, 12, 22, 5, 12];

/// Output handler for CLI messages.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print the cart table.
    pub fn cart_table(&self, items: &[LineItem], currency: Currency) {
        if self.json {
            return;
        }

        self.table_row(&["Product", "Variant", "Price", "Qty", "Total"], &CART_COLUMNS);
        for item in items {
            let row = cart_row(item, currency);
            let cols: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(&cols, &CART_COLUMNS);
        }
    }

    /// Print the order summary box.
    pub fn summary(&self, summary: &CartSummary, currency: Currency) {
        if self.json {
            return;
        }

        if summary.is_empty {
            self.info("Your cart is empty");
            return;
        }

        self.header("Order Summary");
        for line in &summary.lines {
            let amount = line.display_amount(currency);
            match line.kind {
                SummaryLineKind::Discount => self.kv(&line.label, &style(amount).green().to_string()),
                SummaryLineKind::GrandTotal => self.kv(&line.label, &style(amount).bold().to_string()),
                _ => self.kv(&line.label, &amount),
            }
        }
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn cart_row(item: &LineItem, currency: Currency) -> [String; 5] {
    let variant = match (item.color.as_str(), item.size.as_str()) {
        ("", "") => String::new(),
        (color, "") => color.to_string(),
        ("", size) => size.to_string(),
        (color, size) => format!("{} / {}", color, size),
    };
    let price = match item.original_price {
        Some(was) if was > item.price => {
            format!("{} (was {})", item.price.display(currency), was.display(currency))
        }
        _ => item.price.display(currency),
    };
    [
        item.short_name(NAME_WIDTH),
        variant,
        price,
        item.quantity.to_string(),
        item.line_total().display(currency),
    ]
}

/// Notifier that prints notices to the terminal.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    output: Output,
}

impl ConsoleNotifier {
    /// Wrap an output handler.
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, text: &str) {
        self.output.success(text);
    }

    fn notify_error(&self, text: &str) {
        self.output.error(text);
    }
}
