//! Cart summary lines for the presentation layer.

use crate::cart::{DiscountState, PricingResult, TaxConfig};
use crate::money::{Currency, Money};
use serde::Serialize;

/// What a summary line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLineKind {
    Subtotal,
    Tax,
    Shipping,
    Discount,
    GrandTotal,
}

/// One row of the cart summary box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Row kind.
    pub kind: SummaryLineKind,
    /// Row label (e.g., "GST (18%)").
    pub label: String,
    /// Unsigned amount; discount rows are shown negated.
    pub amount: Money,
}

impl SummaryLine {
    fn new(kind: SummaryLineKind, label: impl Into<String>, amount: Money) -> Self {
        Self {
            kind,
            label: label.into(),
            amount,
        }
    }

    /// Formatted amount, with a leading minus for deductions.
    pub fn display_amount(&self, currency: Currency) -> String {
        match self.kind {
            SummaryLineKind::Discount => format!("-{}", self.amount.display(currency)),
            _ => self.amount.display(currency),
        }
    }
}

/// The cart summary box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Whether the cart has no items.
    pub is_empty: bool,
    /// Rows in display order.
    pub lines: Vec<SummaryLine>,
}

impl CartSummary {
    /// Build summary rows.
    ///
    /// The GST row appears whenever GST is configured, even at zero. The
    /// delivery row appears only for a positive charge, the discount row only
    /// for an active discount taking something off.
    pub fn build(result: &PricingResult, tax: &TaxConfig, discount: &DiscountState, is_empty: bool) -> Self {
        let mut lines = vec![SummaryLine::new(
            SummaryLineKind::Subtotal,
            "Subtotal",
            result.subtotal,
        )];

        if let Some(gst) = tax.gst_percent {
            lines.push(SummaryLine::new(
                SummaryLineKind::Tax,
                format!("GST ({}%)", gst.normalize()),
                result.tax_amount,
            ));
        }

        if result.shipping_amount.is_positive() {
            lines.push(SummaryLine::new(
                SummaryLineKind::Shipping,
                "Delivery Charges",
                result.shipping_amount,
            ));
        }

        if discount.is_active && result.has_discount() {
            lines.push(SummaryLine::new(
                SummaryLineKind::Discount,
                "Discount",
                result.discount_amount,
            ));
        }

        lines.push(SummaryLine::new(
            SummaryLineKind::GrandTotal,
            "Grand Total",
            result.grand_total,
        ));

        Self { is_empty, lines }
    }

    /// Find a row by kind.
    pub fn line(&self, kind: SummaryLineKind) -> Option<&SummaryLine> {
        self.lines.iter().find(|l| l.kind == kind)
    }
}
