//! Cart pricing calculations.

use crate::cart::{Discount, LineItem};
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping and GST settings for the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Flat delivery charge for a non-empty cart.
    pub shipping_charge: Money,
    /// GST percentage; `None` means no tax line at all.
    pub gst_percent: Option<Decimal>,
}

impl TaxConfig {
    /// Create a tax config.
    pub fn new(shipping_charge: Money, gst_percent: Option<Decimal>) -> Self {
        Self {
            shipping_charge,
            gst_percent,
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Sum of price * quantity.
    pub subtotal: Money,
    /// Delivery charge.
    pub shipping_amount: Money,
    /// GST on the subtotal.
    pub tax_amount: Money,
    /// Discount taken off.
    pub discount_amount: Money,
    /// Final total (subtotal + shipping - discount + tax), never negative.
    pub grand_total: Money,
}

impl PricingResult {
    /// Check if a discount is taking anything off.
    pub fn has_discount(&self) -> bool {
        self.discount_amount.is_positive()
    }
}

/// Price a cart.
///
/// Tax is charged on the subtotal alone, independent of shipping and
/// discount. Shipping is waived for an empty cart.
pub fn compute_totals(
    items: &[LineItem],
    tax: &TaxConfig,
    discount: Option<&Discount>,
) -> PricingResult {
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();

    let shipping_amount = if items.is_empty() {
        Money::ZERO
    } else {
        tax.shipping_charge
    };

    let tax_amount = tax
        .gst_percent
        .map(|gst| subtotal.percentage(gst))
        .unwrap_or(Money::ZERO);

    let discount_amount = discount
        .map(|d| d.amount_for(subtotal))
        .unwrap_or(Money::ZERO);

    let grand_total = (subtotal + shipping_amount - discount_amount + tax_amount).floor_zero();

    PricingResult {
        subtotal,
        shipping_amount,
        tax_amount,
        discount_amount,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(id: &str, price: Decimal, quantity: i64) -> LineItem {
        LineItem::new(id, id, Money::new(price), quantity).unwrap()
    }

    fn store_tax() -> TaxConfig {
        TaxConfig::new(Money::new(dec!(50)), Some(dec!(18)))
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let a = item("a", dec!(199.99), 3);
        let b = item("b", dec!(45.10), 1);
        let c = item("c", dec!(1200), 2);

        let forward = compute_totals(&[a.clone(), b.clone(), c.clone()], &store_tax(), None);
        let reverse = compute_totals(&[c, b, a], &store_tax(), None);

        assert_eq!(forward.subtotal, Money::new(dec!(3045.07)));
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_empty_cart_is_free() {
        let discount = Discount::flat("BIG", dec!(300));
        let result = compute_totals(&[], &store_tax(), Some(&discount));

        assert_eq!(result.subtotal, Money::ZERO);
        assert_eq!(result.shipping_amount, Money::ZERO);
        assert_eq!(result.tax_amount, Money::ZERO);
        assert_eq!(result.grand_total, Money::ZERO);
    }

    #[test]
    fn test_tax_ignores_discount_and_shipping() {
        let items = [item("a", dec!(1000), 1)];
        let without = compute_totals(&items, &store_tax(), None);
        let with_pct = compute_totals(&items, &store_tax(), Some(&Discount::percentage("P", dec!(25))));
        let with_flat = compute_totals(&items, &store_tax(), Some(&Discount::flat("F", dec!(999))));

        assert_eq!(without.tax_amount, Money::new(dec!(180)));
        assert_eq!(with_pct.tax_amount, Money::new(dec!(180)));
        assert_eq!(with_flat.tax_amount, Money::new(dec!(180)));
    }

    #[test]
    fn test_no_gst_means_no_tax() {
        let items = [item("a", dec!(1000), 1)];
        let tax = TaxConfig::new(Money::new(dec!(50)), None);
        let result = compute_totals(&items, &tax, None);

        assert_eq!(result.tax_amount, Money::ZERO);
        assert_eq!(result.grand_total, Money::new(dec!(1050)));
    }

    #[test]
    fn test_save10_against_1000() {
        let items = [item("a", dec!(250), 4)];
        let discount = Discount::percentage("SAVE10", dec!(10));
        let result = compute_totals(&items, &store_tax(), Some(&discount));

        assert_eq!(result.subtotal, Money::new(dec!(1000)));
        assert_eq!(result.discount_amount, Money::new(dec!(100)));
        // 1000 + 50 - 100 + 180
        assert_eq!(result.grand_total, Money::new(dec!(1130)));
        assert!(result.has_discount());
    }

    #[test]
    fn test_oversized_flat_discount_floors_at_zero() {
        let items = [item("a", dec!(100), 1)];
        let tax = TaxConfig::default();
        let discount = Discount::flat("HUGE", dec!(5000));
        let result = compute_totals(&items, &tax, Some(&discount));

        assert_eq!(result.discount_amount, Money::new(dec!(5000)));
        assert_eq!(result.grand_total, Money::ZERO);
    }

    #[test]
    fn test_flat_discount_offsets_shipping_and_tax() {
        let items = [item("a", dec!(100), 1)];
        let discount = Discount::flat("F", dec!(150));
        let result = compute_totals(&items, &store_tax(), Some(&discount));

        // 100 + 50 - 150 + 18
        assert_eq!(result.grand_total, Money::new(dec!(18)));
    }

    #[test]
    fn test_fractional_tax_is_not_rounded() {
        let items = [item("a", dec!(9.99), 1)];
        let tax = TaxConfig::new(Money::ZERO, Some(dec!(12.5)));
        let result = compute_totals(&items, &tax, None);

        assert_eq!(result.tax_amount.amount(), dec!(1.24875));
        assert_eq!(result.grand_total.amount(), dec!(11.23875));
        assert_eq!(result.grand_total.display_amount(), "11.24");
    }

    #[test]
    fn test_out_of_range_price_saturates() {
        let items = [item("a", Decimal::MAX, 2), item("b", dec!(10), 1)];
        let discount = Discount::percentage("SAVE10", dec!(10));
        let result = compute_totals(&items, &store_tax(), Some(&discount));

        assert_eq!(result.subtotal, Money::new(Decimal::MAX));
        assert!(result.grand_total.is_positive());
    }
}
