//! Discount code types.

use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a discount's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountKind {
    /// `value` percent of the subtotal.
    Percentage,
    /// `value` off, in currency units.
    Flat,
}

/// A resolved discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Discount code (e.g., "SAVE10").
    pub code: String,
    /// Interpretation of `value`.
    pub kind: DiscountKind,
    /// Percent or currency amount.
    pub value: Decimal,
}

impl Discount {
    /// Create a percentage discount.
    pub fn percentage(code: impl Into<String>, percent: Decimal) -> Self {
        Self {
            code: code.into(),
            kind: DiscountKind::Percentage,
            value: percent,
        }
    }

    /// Create a flat discount.
    pub fn flat(code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            code: code.into(),
            kind: DiscountKind::Flat,
            value: amount,
        }
    }

    /// Amount taken off `subtotal`.
    ///
    /// Flat amounts are returned as is, even when larger than the subtotal.
    pub fn amount_for(&self, subtotal: Money) -> Money {
        match self.kind {
            DiscountKind::Percentage => subtotal.percentage(self.value),
            DiscountKind::Flat => Money::new(self.value),
        }
    }
}
