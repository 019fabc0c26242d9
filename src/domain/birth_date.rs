use super::order::Order;
use chrono::NaiveDate;
use tracing::debug;

/// Key under which checkout stores a payer-supplied birth date.
pub const BIRTH_DATE_KEY: &str = "birth_date";

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves the payer's birth date, first match wins:
/// payment additional data, the order's recorded DOB, then the customer profile.
pub fn resolve_birth_date(order: &Order) -> Option<NaiveDate> {
    if let Some(raw) = order.payment.additional(BIRTH_DATE_KEY) {
        match NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT) {
            Ok(date) => return Some(date),
            Err(e) => debug!(value = raw, error = %e, "Ignoring unparseable birth date"),
        }
    }

    order
        .customer_dob
        .or_else(|| order.customer.as_ref().and_then(|c| c.dob))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Customer;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order_with(additional: Option<&str>) -> Order {
        let mut order = Order {
            customer_dob: Some(date(1980, 1, 1)),
            customer: Some(Customer {
                id: "7".to_string(),
                dob: Some(date(1970, 6, 15)),
            }),
            ..Default::default()
        };
        if let Some(value) = additional {
            order
                .payment
                .additional_information
                .insert(BIRTH_DATE_KEY.to_string(), value.to_string());
        }
        order
    }

    #[test]
    fn test_additional_data_wins() {
        let order = order_with(Some("1990-12-31"));
        assert_eq!(resolve_birth_date(&order), Some(date(1990, 12, 31)));
    }

    #[test]
    fn test_unparseable_additional_data_falls_through() {
        let order = order_with(Some("31-12-1990"));
        assert_eq!(resolve_birth_date(&order), Some(date(1980, 1, 1)));
    }

    #[test]
    fn test_customer_profile_is_last_resort() {
        let mut order = order_with(None);
        order.customer_dob = None;
        assert_eq!(resolve_birth_date(&order), Some(date(1970, 6, 15)));
    }

    #[test]
    fn test_none_when_nothing_recorded() {
        assert_eq!(resolve_birth_date(&Order::default()), None);
    }
}
