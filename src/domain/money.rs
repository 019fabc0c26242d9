use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two currencies recorded on an order a request is expressed in.
///
/// Resolved once per request from the `always_base_currency` flag and then
/// threaded through every monetary field, so a single request never mixes
/// base and presentment values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencySelection {
    Base,
    #[default]
    Presentment,
}

impl CurrencySelection {
    pub fn from_flag(always_base_currency: bool) -> Self {
        if always_base_currency {
            Self::Base
        } else {
            Self::Presentment
        }
    }
}

/// A value the order system records in both base and presentment currency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dual<T> {
    #[serde(default)]
    pub base: T,
    #[serde(default)]
    pub presentment: T,
}

impl<T> Dual<T> {
    pub fn new(base: T, presentment: T) -> Self {
        Self { base, presentment }
    }

    pub fn select(&self, selection: CurrencySelection) -> &T {
        match selection {
            CurrencySelection::Base => &self.base,
            CurrencySelection::Presentment => &self.presentment,
        }
    }
}

impl<T: Clone> Dual<T> {
    /// Same value in both currencies.
    pub fn uniform(value: T) -> Self {
        Self {
            base: value.clone(),
            presentment: value,
        }
    }
}

/// The `(amount, currency)` pair a transaction is started with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    /// Picks the grand total and its currency code for `selection`.
    ///
    /// Both must be present; a blank currency code counts as missing.
    pub fn resolve(
        grand_total: &Dual<Option<Decimal>>,
        currency_code: &Dual<Option<String>>,
        selection: CurrencySelection,
    ) -> Result<Self> {
        let amount = (*grand_total.select(selection)).ok_or_else(|| {
            PaymentError::InvalidOrderState(format!("{:?} grand total is missing", selection))
        })?;
        let currency = currency_code
            .select(selection)
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                PaymentError::InvalidOrderState(format!(
                    "{:?} currency code is missing",
                    selection
                ))
            })?;

        Ok(Self {
            amount,
            currency: currency.to_uppercase(),
        })
    }
}
