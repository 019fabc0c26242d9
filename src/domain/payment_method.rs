//! Payment-method variants and their per-method configuration.
//!
//! Variants only differ in their default payment-option id and in what they
//! copy from checkout input onto the payment record. Request building stays
//! variant-agnostic.

use super::birth_date::BIRTH_DATE_KEY;
use super::money::CurrencySelection;
use super::order::{AdditionalData, PaymentRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const KLARNA_CODE: &str = "paynl_payment_klarna";
pub const KLARNA_OPTION_ID: u32 = 1717;

/// When the order confirmation e-mail is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewOrderEmailPolicy {
    #[default]
    BeforePayment,
    AfterPayment,
}

/// Configuration of a single payment method, keyed by `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodConfig {
    pub code: String,
    /// Overrides the variant's default option id when non-empty.
    pub payment_option_id: Option<String>,
    /// Status an order gets while awaiting payment.
    pub order_status: String,
    pub holded: bool,
    pub send_new_order_email: NewOrderEmailPolicy,
    pub test_mode: bool,
    pub always_base_currency: bool,
    pub send_discount_tax: bool,
    pub instructions: Option<String>,
}

impl Default for PaymentMethodConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            payment_option_id: None,
            order_status: "pending".to_string(),
            holded: false,
            send_new_order_email: NewOrderEmailPolicy::default(),
            test_mode: false,
            always_base_currency: false,
            send_discount_tax: true,
            instructions: None,
        }
    }
}

impl PaymentMethodConfig {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// The configured option id, if one is set and numeric.
    pub fn payment_option_id_override(&self) -> Option<u32> {
        let raw = self.payment_option_id.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(code = %self.code, value = raw, "Ignoring non-numeric payment option id");
                None
            }
        }
    }

    pub fn currency_selection(&self) -> CurrencySelection {
        CurrencySelection::from_flag(self.always_base_currency)
    }

    pub fn suppresses_confirmation_email(&self) -> bool {
        self.send_new_order_email == NewOrderEmailPolicy::AfterPayment
    }

    /// Payment instructions shown to the payer, trimmed.
    pub fn instructions(&self) -> String {
        self.instructions
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

pub trait PaymentMethod: Send + Sync {
    fn code(&self) -> &str;

    fn default_payment_option_id(&self) -> u32;

    /// Copies checkout input onto the payment record. Most methods need nothing.
    fn assign_data(&self, _input: &AdditionalData, _payment: &mut PaymentRecord) {}

    fn payment_option_id(&self, config: &PaymentMethodConfig) -> u32 {
        config
            .payment_option_id_override()
            .unwrap_or_else(|| self.default_payment_option_id())
    }
}

pub type PaymentMethodBox = Box<dyn PaymentMethod>;

/// A method with no extra checkout fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardMethod {
    pub code: &'static str,
    pub default_option_id: u32,
}

impl PaymentMethod for StandardMethod {
    fn code(&self) -> &str {
        self.code
    }

    fn default_payment_option_id(&self) -> u32 {
        self.default_option_id
    }
}

/// Klarna needs the payer's birth date and full first name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Klarna;

impl PaymentMethod for Klarna {
    fn code(&self) -> &str {
        KLARNA_CODE
    }

    fn default_payment_option_id(&self) -> u32 {
        KLARNA_OPTION_ID
    }

    fn assign_data(&self, input: &AdditionalData, payment: &mut PaymentRecord) {
        if let Some(birth_date) = input.get(BIRTH_DATE_KEY) {
            payment
                .additional_information
                .insert(BIRTH_DATE_KEY.to_string(), birth_date.clone());
        }
    }
}

pub const STANDARD_METHODS: [StandardMethod; 5] = [
    StandardMethod {
        code: "paynl_payment_ideal",
        default_option_id: 10,
    },
    StandardMethod {
        code: "paynl_payment_paypal",
        default_option_id: 138,
    },
    StandardMethod {
        code: "paynl_payment_mistercash",
        default_option_id: 436,
    },
    StandardMethod {
        code: "paynl_payment_sofortbanking",
        default_option_id: 559,
    },
    StandardMethod {
        code: "paynl_payment_visamastercard",
        default_option_id: 706,
    },
];

/// Looks up a known payment method by its configuration code.
pub fn method_for_code(code: &str) -> Option<PaymentMethodBox> {
    if code == KLARNA_CODE {
        return Some(Box::new(Klarna));
    }
    STANDARD_METHODS
        .iter()
        .find(|m| m.code == code)
        .map(|m| Box::new(*m) as PaymentMethodBox)
}
