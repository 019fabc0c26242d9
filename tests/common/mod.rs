#![allow(dead_code)]

use paynl_checkout::domain::money::Dual;
use paynl_checkout::domain::order::{Address, Order, OrderItem};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

pub const FIXTURE_ORDER: &str = "tests/fixtures/order.json";

pub fn address(first_name: &str, street: &str) -> Address {
    Address {
        first_name: first_name.to_string(),
        last_name: "Jansen".to_string(),
        phone: None,
        email: Some("anna@example.com".to_string()),
        street: street.to_string(),
        postcode: "1011AB".to_string(),
        city: "Amsterdam".to_string(),
        country_code: "NL".to_string(),
    }
}

pub fn sample_order() -> Order {
    Order {
        entity_id: "42".to_string(),
        increment_id: "100000042".to_string(),
        currency_code: Dual::new(Some("EUR".to_string()), Some("USD".to_string())),
        grand_total: Dual::new(Some(dec!(100.00)), Some(dec!(110.00))),
        items: vec![OrderItem {
            product_id: "sku-1".to_string(),
            name: "Desk lamp".to_string(),
            qty_ordered: dec!(1),
            price: Dual::new(Some(dec!(90.91)), Some(dec!(100.00))),
            price_incl_tax: Dual::new(Some(dec!(110.00)), Some(dec!(121.00))),
            tax_amount: Dual::default(),
        }],
        billing_address: Some(address("anna", "Main Street 12a")),
        remote_ip: Some("198.51.100.7".to_string()),
        ..Default::default()
    }
}

/// Writes `order` to a temporary JSON file kept alive by the returned handle.
pub fn order_file(order: &Order) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut file, order).unwrap();
    file.flush().unwrap();
    file
}
