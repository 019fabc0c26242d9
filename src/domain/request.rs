use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Synthetic product id of the shipping line.
pub const SHIPPING_LINE_ID: &str = "shipping";
/// Synthetic product id of the discount line.
pub const DISCOUNT_LINE_ID: &str = "discount";

/// A priced line as sent to the gateway. `price` includes tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub qty: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndUser {
    pub initials: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAddress {
    pub initials: String,
    pub last_name: String,
    pub street_name: String,
    pub house_number: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

/// Fully formed transaction-start request.
///
/// Optional blocks are omitted from the serialized form rather than sent empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub amount: Decimal,
    pub currency: String,
    pub return_url: String,
    pub exchange_url: String,
    pub payment_method: u32,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<DateTime<Utc>>,
    pub description: String,
    pub extra1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra2: Option<String>,
    pub extra3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enduser: Option<EndUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_address: Option<RequestAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<RequestAddress>,
    pub products: Vec<ProductLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testmode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipaddress: Option<IpAddr>,
}
