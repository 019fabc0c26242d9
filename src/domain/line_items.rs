//! Turns order lines, shipping and discount into the gateway's product list.

use super::money::CurrencySelection;
use super::order::Order;
use super::request::{DISCOUNT_LINE_ID, ProductLine, SHIPPING_LINE_ID};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;

const DEFAULT_SHIPPING_NAME: &str = "Shipping";
const DISCOUNT_NAME: &str = "Discount";

/// Assembles product lines in a single currency.
#[derive(Debug, Clone, Copy)]
pub struct LineItemAssembler {
    selection: CurrencySelection,
    send_discount_tax: bool,
}

impl LineItemAssembler {
    pub fn new(selection: CurrencySelection, send_discount_tax: bool) -> Self {
        Self {
            selection,
            send_discount_tax,
        }
    }

    pub fn assemble(&self, order: &Order) -> Result<Vec<ProductLine>> {
        let mut lines = Vec::with_capacity(order.items.len() + 2);

        for item in &order.items {
            // Whether a line is sent follows the order's own price, not the selection.
            if item.price_incl_tax.presentment.is_none() {
                continue;
            }

            let incl = (*item.price_incl_tax.select(self.selection)).ok_or_else(|| {
                PaymentError::InvalidOrderState(format!(
                    "item {} has no {:?} price incl. tax",
                    item.product_id, self.selection
                ))
            })?;
            let excl = (*item.price.select(self.selection)).ok_or_else(|| {
                PaymentError::InvalidOrderState(format!(
                    "item {} has no {:?} price",
                    item.product_id, self.selection
                ))
            })?;

            lines.push(ProductLine {
                id: item.product_id.clone(),
                name: item.name.clone(),
                price: incl,
                qty: item.qty_ordered,
                tax: incl - excl,
            });
        }

        let shipping = *order.shipping_incl_tax.select(self.selection);
        if !shipping.is_zero() {
            lines.push(ProductLine {
                id: SHIPPING_LINE_ID.to_string(),
                name: order
                    .shipping_description
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SHIPPING_NAME.to_string()),
                price: shipping,
                qty: Decimal::ONE,
                tax: *order.shipping_tax.select(self.selection),
            });
        }

        let discount = *order.discount_amount.select(self.selection);
        if !discount.is_zero() {
            let tax = if self.send_discount_tax {
                -*order.discount_tax_compensation.select(self.selection)
            } else {
                Decimal::ZERO
            };
            lines.push(ProductLine {
                id: DISCOUNT_LINE_ID.to_string(),
                name: DISCOUNT_NAME.to_string(),
                price: discount,
                qty: Decimal::ONE,
                tax,
            });
        }

        Ok(lines)
    }
}
