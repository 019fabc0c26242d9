use super::money::Dual;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form, payment-specific key/value data captured at checkout.
///
/// Ordered so that anything derived from it is deterministic.
pub type AdditionalData = BTreeMap<String, String>;

/// Payment record attached to an order by the order system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub additional_information: AdditionalData,
    /// Gateway transaction a capture, refund or void applies to.
    #[serde(default)]
    pub parent_transaction_id: Option<String>,
}

impl PaymentRecord {
    pub fn additional(&self, key: &str) -> Option<&str> {
        self.additional_information.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub street: String,
    pub postcode: String,
    pub city: String,
    pub country_code: String,
}

/// A visible order line as recorded by the order system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub qty_ordered: Decimal,
    /// Unit price excluding tax.
    #[serde(default)]
    pub price: Dual<Option<Decimal>>,
    /// Unit price including tax. Lines without it are not sent.
    #[serde(default)]
    pub price_incl_tax: Dual<Option<Decimal>>,
    /// Stored tax; can reflect post-discount adjustments, so it is not used.
    #[serde(default)]
    pub tax_amount: Dual<Option<Decimal>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
}

/// Read-only snapshot of an order for the duration of one request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Order {
    pub entity_id: String,
    pub increment_id: String,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub currency_code: Dual<Option<String>>,
    #[serde(default)]
    pub grand_total: Dual<Option<Decimal>>,
    #[serde(default)]
    pub discount_amount: Dual<Decimal>,
    #[serde(default)]
    pub discount_tax_compensation: Dual<Decimal>,
    #[serde(default)]
    pub shipping_incl_tax: Dual<Decimal>,
    #[serde(default)]
    pub shipping_tax: Dual<Decimal>,
    #[serde(default)]
    pub shipping_description: Option<String>,
    #[serde(default)]
    pub remote_ip: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub payment: PaymentRecord,
    #[serde(default)]
    pub customer_dob: Option<NaiveDate>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_deserialization_defaults_optional_blocks() {
        let json = r#"{
            "entity_id": "42",
            "increment_id": "100000042",
            "grand_total": {"base": "100.00", "presentment": "110.00"},
            "currency_code": {"base": "EUR", "presentment": "USD"}
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.grand_total.base, Some(dec!(100.00)));
        assert!(order.billing_address.is_none());
        assert!(order.items.is_empty());
        assert_eq!(order.discount_amount, Dual::default());
        assert!(order.payment.additional_information.is_empty());
    }

    #[test]
    fn test_payment_additional_lookup() {
        let mut payment = PaymentRecord::default();
        payment
            .additional_information
            .insert("bank_id".to_string(), "1".to_string());
        assert_eq!(payment.additional("bank_id"), Some("1"));
        assert_eq!(payment.additional("valid_days"), None);
    }
}
