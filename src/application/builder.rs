use crate::config::Settings;
use crate::domain::address::{FirstNamePolicy, split_street};
use crate::domain::birth_date::resolve_birth_date;
use crate::domain::line_items::LineItemAssembler;
use crate::domain::money::Money;
use crate::domain::order::{Address, Order};
use crate::domain::payment_method::{PaymentMethod, PaymentMethodConfig};
use crate::domain::ports::IpResolverBox;
use crate::domain::request::{EndUser, RequestAddress, TransactionRequest};
use crate::error::Result;
use chrono::{DateTime, TimeDelta, Utc};
use std::net::IpAddr;
use tracing::{debug, warn};

pub const RETURN_PATH: &str = "paynl/checkout/finish/";
pub const EXCHANGE_PATH: &str = "paynl/checkout/exchange/";

const BANK_ID_KEY: &str = "bank_id";
const VALID_DAYS_KEY: &str = "valid_days";

/// Store-level values a request is built against.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreContext {
    pub base_url: String,
    pub language: String,
    /// Option id Klarna resolves to; requests using it carry full first names.
    pub klarna_option_id: u32,
}

impl StoreContext {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_url: settings.store_base_url.clone(),
            language: settings.language.clone(),
            klarna_option_id: settings.klarna_option_id(),
        }
    }

    fn url(&self, path: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Builds transaction-start requests from order snapshots.
///
/// Building performs no network call. Given the same order, configuration
/// and `now`, it always yields the same request.
pub struct TransactionRequestBuilder {
    ip_resolver: IpResolverBox,
}

impl TransactionRequestBuilder {
    /// Creates a builder that falls back to `ip_resolver` when the order's
    /// stored IP does not validate (the order system may truncate it).
    pub fn new(ip_resolver: IpResolverBox) -> Self {
        Self { ip_resolver }
    }

    pub fn build(
        &self,
        order: &Order,
        method: &dyn PaymentMethod,
        config: &PaymentMethodConfig,
        store: &StoreContext,
        now: DateTime<Utc>,
    ) -> Result<TransactionRequest> {
        let selection = config.currency_selection();
        let money = Money::resolve(&order.grand_total, &order.currency_code, selection)?;
        let products =
            LineItemAssembler::new(selection, config.send_discount_tax).assemble(order)?;

        let payment_option_id = method.payment_option_id(config);
        let policy = if payment_option_id == store.klarna_option_id {
            FirstNamePolicy::FullName
        } else {
            FirstNamePolicy::Initials
        };

        let enduser = order.billing_address.as_ref().map(|billing| EndUser {
            initials: policy.render(&billing.first_name),
            last_name: billing.last_name.clone(),
            phone_number: billing.phone.clone(),
            email_address: billing.email.clone(),
            birth_date: resolve_birth_date(order),
        });
        let invoice_address = order
            .billing_address
            .as_ref()
            .map(|a| address_block(a, policy));
        let address = order
            .shipping_address
            .as_ref()
            .map(|a| address_block(a, policy));

        let request = TransactionRequest {
            amount: money.amount,
            currency: money.currency,
            return_url: store.url(RETURN_PATH),
            exchange_url: store.url(EXCHANGE_PATH),
            payment_method: payment_option_id,
            language: store.language.clone(),
            bank: bank_id(order),
            expire_date: expiry(order, now),
            description: order.increment_id.clone(),
            extra1: order.increment_id.clone(),
            extra2: order.quote_id.clone(),
            extra3: order.entity_id.clone(),
            enduser,
            invoice_address,
            address,
            products,
            testmode: config.test_mode.then_some(true),
            ipaddress: self.client_ip(order),
        };

        debug!(
            order = %order.increment_id,
            payment_method = request.payment_method,
            amount = %request.amount,
            currency = %request.currency,
            lines = request.products.len(),
            "Built transaction request"
        );
        Ok(request)
    }

    fn client_ip(&self, order: &Order) -> Option<IpAddr> {
        if let Some(ip) = order
            .remote_ip
            .as_deref()
            .and_then(|raw| raw.trim().parse::<IpAddr>().ok())
        {
            return Some(ip);
        }

        let resolved = self.ip_resolver.resolve();
        if resolved.is_none() {
            warn!(order = %order.increment_id, "No valid client IP available");
        }
        resolved
    }
}

fn address_block(address: &Address, policy: FirstNamePolicy) -> RequestAddress {
    let (street_name, house_number) = split_street(&address.street).unwrap_or_else(|e| {
        debug!(error = %e, "Street could not be split, sending empty street fields");
        (String::new(), String::new())
    });

    RequestAddress {
        initials: policy.render(&address.first_name),
        last_name: address.last_name.clone(),
        street_name,
        house_number,
        zip_code: address.postcode.clone(),
        city: address.city.clone(),
        country: address.country_code.clone(),
    }
}

fn bank_id(order: &Order) -> Option<u32> {
    let raw = order.payment.additional(BANK_ID_KEY)?;
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            debug!(value = raw, "Omitting non-numeric bank id");
            None
        }
    }
}

fn expiry(order: &Order, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let raw = order.payment.additional(VALID_DAYS_KEY)?;
    let days: u32 = match raw.trim().parse() {
        Ok(days) => days,
        Err(_) => {
            debug!(value = raw, "Omitting non-numeric validity period");
            return None;
        }
    };
    TimeDelta::try_days(i64::from(days)).and_then(|delta| now.checked_add_signed(delta))
}
