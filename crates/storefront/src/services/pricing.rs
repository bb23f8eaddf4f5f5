//! Order totals calculator.
//!
//! Pure and deterministic: the same line items always produce the same
//! totals. Shipping is waived only when the subtotal strictly exceeds the
//! free-shipping threshold; tax applies to subtotal + shipping and is
//! rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use crate::config::PricingConfig;

/// Errors from totals computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A line item has a zero or negative quantity.
    #[error("line item quantity must be positive, got {quantity}")]
    InvalidQuantity {
        /// The offending quantity.
        quantity: i32,
    },
}

/// A line item as seen by the pricing calculator: a unit price (captured at
/// reservation time) and a quantity.
#[derive(Debug, Clone, Copy)]
pub struct PricedLine {
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Computed totals for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PricingConfig {
    /// Compute order totals from priced line items.
    ///
    /// - subtotal = sum of unit price x quantity
    /// - shipping = 0 if subtotal > free-shipping threshold, else the flat fee
    /// - tax = tax rate x (subtotal + shipping), rounded to cents
    /// - total = subtotal + shipping + tax
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidQuantity` if any quantity is zero or
    /// negative.
    pub fn compute_totals(&self, lines: &[PricedLine]) -> Result<OrderTotals, PricingError> {
        let mut subtotal = Decimal::ZERO;
        for line in lines {
            if line.quantity <= 0 {
                return Err(PricingError::InvalidQuantity {
                    quantity: line.quantity,
                });
            }
            subtotal += line.unit_price * Decimal::from(line.quantity);
        }

        let shipping = if subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping_fee
        };

        let tax = (self.tax_rate * (subtotal + shipping))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Ok(OrderTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing() -> PricingConfig {
        PricingConfig::default()
    }

    fn line(unit_price: &str, quantity: i32) -> PricedLine {
        PricedLine {
            unit_price: unit_price.parse().expect("decimal literal"),
            quantity,
        }
    }

    #[test]
    fn test_worked_example() {
        // 3 x 100.00: subtotal 300, shipping 49.99, tax 8% of 349.99 -> 28.00
        let totals = pricing()
            .compute_totals(&[line("100", 3)])
            .expect("valid lines");
        assert_eq!(totals.subtotal, "300".parse::<Decimal>().expect("dec"));
        assert_eq!(totals.shipping, "49.99".parse::<Decimal>().expect("dec"));
        assert_eq!(totals.tax, "28.00".parse::<Decimal>().expect("dec"));
        assert_eq!(totals.total, "377.99".parse::<Decimal>().expect("dec"));
    }

    #[test]
    fn test_deterministic() {
        let lines = [line("19.99", 2), line("5.25", 4)];
        let first = pricing().compute_totals(&lines).expect("valid");
        let second = pricing().compute_totals(&lines).expect("valid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_shipping_boundary_exclusive() {
        // Exactly at the threshold the fee still applies.
        let at = pricing()
            .compute_totals(&[line("1000.00", 1)])
            .expect("valid");
        assert_eq!(at.shipping, "49.99".parse::<Decimal>().expect("dec"));

        // One cent over waives it.
        let over = pricing()
            .compute_totals(&[line("1000.01", 1)])
            .expect("valid");
        assert_eq!(over.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_totals_to_shipping_plus_tax() {
        // The checkout service rejects empty carts before pricing; the
        // calculator itself just prices what it is given.
        let totals = pricing().compute_totals(&[]).expect("valid");
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, "49.99".parse::<Decimal>().expect("dec"));
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        assert_eq!(
            pricing().compute_totals(&[line("10", 0)]),
            Err(PricingError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            pricing().compute_totals(&[line("10", -2)]),
            Err(PricingError::InvalidQuantity { quantity: -2 })
        );
    }

    #[test]
    fn test_tax_rounded_to_cents() {
        // 8% of 10.10 + 49.99 = 8% of 60.09 = 4.8072 -> 4.81
        let totals = pricing()
            .compute_totals(&[line("10.10", 1)])
            .expect("valid");
        assert_eq!(totals.tax, "4.81".parse::<Decimal>().expect("dec"));
    }
}
