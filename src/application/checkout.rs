use super::builder::{StoreContext, TransactionRequestBuilder};
use super::lifecycle::TransactionLifecycleClient;
use crate::domain::order::{AdditionalData, Order, PaymentRecord};
use crate::domain::order_state::{OrderState, StatusCatalog, resolve_order_state};
use crate::domain::payment_method::{PaymentMethodBox, PaymentMethodConfig};
use crate::domain::request::TransactionRequest;
use crate::domain::transaction::LifecycleAck;
use crate::error::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// What the order system should apply when an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderInitialization {
    /// `None` when the configured status belongs to no awaiting-payment state.
    pub state: Option<OrderState>,
    pub status: String,
    pub is_notified: bool,
    pub suppress_confirmation_email: bool,
    /// Payment instructions shown to the payer, empty when none are set.
    pub instructions: String,
}

/// Result of starting a payment, plus instructions for the order system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartOutcome {
    pub transaction_id: String,
    pub redirect_url: String,
    pub hold_order: bool,
}

/// One payment method wired to its configuration and collaborators.
pub struct CheckoutService {
    method: PaymentMethodBox,
    config: PaymentMethodConfig,
    store: StoreContext,
    builder: TransactionRequestBuilder,
    lifecycle: TransactionLifecycleClient,
    catalog: Box<dyn StatusCatalog>,
}

impl CheckoutService {
    pub fn new(
        method: PaymentMethodBox,
        config: PaymentMethodConfig,
        store: StoreContext,
        builder: TransactionRequestBuilder,
        lifecycle: TransactionLifecycleClient,
        catalog: Box<dyn StatusCatalog>,
    ) -> Self {
        Self {
            method,
            config,
            store,
            builder,
            lifecycle,
            catalog,
        }
    }

    pub fn code(&self) -> &str {
        self.method.code()
    }

    /// Decides the state and status a freshly placed order enters.
    pub fn initialize(&self) -> OrderInitialization {
        let status = self.config.order_status.clone();
        let state = resolve_order_state(self.catalog.as_ref(), &status);
        if state.is_none() {
            warn!(code = self.code(), %status, "Configured status matches no order state");
        }

        OrderInitialization {
            state,
            status,
            is_notified: false,
            suppress_confirmation_email: self.config.suppresses_confirmation_email(),
            instructions: self.config.instructions(),
        }
    }

    /// Copies method-specific checkout input onto the payment record.
    pub fn assign_data(&self, input: &AdditionalData, payment: &mut PaymentRecord) {
        self.method.assign_data(input, payment);
    }

    pub fn build_request(&self, order: &Order, now: DateTime<Utc>) -> Result<TransactionRequest> {
        self.builder
            .build(order, self.method.as_ref(), &self.config, &self.store, now)
    }

    /// Builds the request and starts the transaction. Build errors abort
    /// before any gateway call is made.
    pub async fn start_transaction(
        &self,
        order: &Order,
        now: DateTime<Utc>,
    ) -> Result<StartOutcome> {
        let request = self.build_request(order, now)?;
        let result = self.lifecycle.start(&request).await?;

        if self.config.holded {
            info!(order = %order.increment_id, "Order will be placed on hold");
        }

        Ok(StartOutcome {
            transaction_id: result.transaction_id,
            redirect_url: result.redirect_url,
            hold_order: self.config.holded,
        })
    }

    pub async fn capture(&self, payment: &PaymentRecord, amount: Decimal) -> Result<LifecycleAck> {
        self.lifecycle.capture(payment, amount).await
    }

    pub async fn refund(&self, payment: &PaymentRecord, amount: Decimal) -> Result<LifecycleAck> {
        self.lifecycle.refund(payment, amount).await
    }

    pub async fn void(&self, payment: &PaymentRecord) -> Result<LifecycleAck> {
        self.lifecycle.void(payment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Dual;
    use crate::domain::payment_method::{Klarna, NewOrderEmailPolicy};
    use crate::error::PaymentError;
    use crate::infrastructure::in_memory::{InMemoryGateway, InMemoryStatusCatalog};
    use crate::infrastructure::ip::StaticIpResolver;
    use rust_decimal_macros::dec;

    fn service(config: PaymentMethodConfig, gateway: InMemoryGateway) -> CheckoutService {
        CheckoutService::new(
            Box::new(Klarna),
            config,
            StoreContext {
                base_url: "https://shop.test/".to_string(),
                language: "en".to_string(),
                klarna_option_id: 1717,
            },
            TransactionRequestBuilder::new(Box::new(StaticIpResolver::new(None))),
            TransactionLifecycleClient::new(Box::new(gateway)),
            Box::new(InMemoryStatusCatalog::new()),
        )
    }

    fn order() -> Order {
        Order {
            entity_id: "1".to_string(),
            increment_id: "100000001".to_string(),
            currency_code: Dual::uniform(Some("EUR".to_string())),
            grand_total: Dual::uniform(Some(dec!(20.00))),
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_resolves_state_and_email_policy() {
        let mut config = PaymentMethodConfig::new("paynl_payment_klarna");
        config.order_status = "pending_payment".to_string();
        config.send_new_order_email = NewOrderEmailPolicy::AfterPayment;

        let init = service(config, InMemoryGateway::new()).initialize();

        assert_eq!(init.state, Some(OrderState::PendingPayment));
        assert_eq!(init.status, "pending_payment");
        assert!(!init.is_notified);
        assert!(init.suppress_confirmation_email);
        assert_eq!(init.instructions, "");
    }

    #[test]
    fn test_initialize_carries_trimmed_instructions() {
        let mut config = PaymentMethodConfig::new("paynl_payment_ideal");
        config.instructions = Some("  Pay within 7 days. \n".to_string());

        let init = service(config, InMemoryGateway::new()).initialize();

        assert_eq!(init.instructions, "Pay within 7 days.");
    }

    #[test]
    fn test_initialize_unknown_status_leaves_state_unresolved() {
        let mut config = PaymentMethodConfig::new("paynl_payment_klarna");
        config.order_status = "custom_waiting".to_string();

        let init = service(config, InMemoryGateway::new()).initialize();

        assert_eq!(init.state, None);
        assert_eq!(init.status, "custom_waiting");
        assert!(!init.suppress_confirmation_email);
    }

    #[tokio::test]
    async fn test_start_transaction_with_hold() {
        let gateway = InMemoryGateway::new();
        let mut config = PaymentMethodConfig::new("paynl_payment_klarna");
        config.holded = true;

        let outcome = service(config, gateway.clone())
            .start_transaction(&order(), Utc::now())
            .await
            .unwrap();

        assert!(outcome.hold_order);
        assert!(outcome.redirect_url.ends_with(&outcome.transaction_id));
        let started = gateway.started().await;
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].payment_method, 1717);
    }

    #[tokio::test]
    async fn test_build_error_prevents_gateway_call() {
        let gateway = InMemoryGateway::new();
        let mut order = order();
        order.grand_total = Dual::default();

        let result = service(PaymentMethodConfig::new("paynl_payment_klarna"), gateway.clone())
            .start_transaction(&order, Utc::now())
            .await;

        assert!(matches!(result, Err(PaymentError::InvalidOrderState(_))));
        assert!(gateway.started().await.is_empty());
    }

    #[test]
    fn test_assign_data_delegates_to_variant() {
        let svc = service(
            PaymentMethodConfig::new("paynl_payment_klarna"),
            InMemoryGateway::new(),
        );
        let mut input = AdditionalData::new();
        input.insert("birth_date".to_string(), "1990-05-04".to_string());
        let mut payment = PaymentRecord::default();

        svc.assign_data(&input, &mut payment);

        assert_eq!(payment.additional("birth_date"), Some("1990-05-04"));
    }
}
