use crate::domain::order::PaymentRecord;
use crate::domain::ports::GatewayClientBox;
use crate::domain::request::TransactionRequest;
use crate::domain::transaction::{LifecycleAck, LifecycleOperation, TransactionResult};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Issues start, capture, refund and void calls against the gateway.
///
/// Holds no state of its own. Capture, refund and void target the payment's
/// parent transaction, never the order id.
pub struct TransactionLifecycleClient {
    gateway: GatewayClientBox,
}

impl TransactionLifecycleClient {
    pub fn new(gateway: GatewayClientBox) -> Self {
        Self { gateway }
    }

    /// Starts a transaction. The caller persists the returned id before
    /// redirecting the payer; repeated calls start repeated transactions.
    pub async fn start(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        let result = self
            .gateway
            .start(request)
            .await
            .inspect_err(|e| warn!(error = %e, "Transaction start failed"))?;
        info!(
            transaction_id = %result.transaction_id,
            order = %request.extra1,
            "Transaction started"
        );
        Ok(result)
    }

    pub async fn capture(&self, payment: &PaymentRecord, amount: Decimal) -> Result<LifecycleAck> {
        let transaction_id = parent_transaction_id(payment, LifecycleOperation::Capture)?;
        self.gateway
            .capture(transaction_id, amount)
            .await
            .inspect_err(|e| warn!(transaction_id, error = %e, "Capture failed"))?;
        Ok(acknowledge(LifecycleOperation::Capture, transaction_id, Some(amount)))
    }

    pub async fn refund(&self, payment: &PaymentRecord, amount: Decimal) -> Result<LifecycleAck> {
        let transaction_id = parent_transaction_id(payment, LifecycleOperation::Refund)?;
        self.gateway
            .refund(transaction_id, amount)
            .await
            .inspect_err(|e| warn!(transaction_id, error = %e, "Refund failed"))?;
        Ok(acknowledge(LifecycleOperation::Refund, transaction_id, Some(amount)))
    }

    pub async fn void(&self, payment: &PaymentRecord) -> Result<LifecycleAck> {
        let transaction_id = parent_transaction_id(payment, LifecycleOperation::Void)?;
        self.gateway
            .void(transaction_id)
            .await
            .inspect_err(|e| warn!(transaction_id, error = %e, "Void failed"))?;
        Ok(acknowledge(LifecycleOperation::Void, transaction_id, None))
    }
}

fn parent_transaction_id(payment: &PaymentRecord, operation: LifecycleOperation) -> Result<&str> {
    payment
        .parent_transaction_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            PaymentError::InvalidOrderState(format!(
                "cannot {operation}: payment has no parent transaction"
            ))
        })
}

fn acknowledge(
    operation: LifecycleOperation,
    transaction_id: &str,
    amount: Option<Decimal>,
) -> LifecycleAck {
    info!(%operation, transaction_id, "Gateway acknowledged");
    LifecycleAck {
        operation,
        transaction_id: transaction_id.to_string(),
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{GatewayCall, InMemoryGateway};
    use rust_decimal_macros::dec;

    fn payment(parent: Option<&str>) -> PaymentRecord {
        PaymentRecord {
            parent_transaction_id: parent.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_capture_targets_parent_transaction() {
        let gateway = InMemoryGateway::new();
        let client = TransactionLifecycleClient::new(Box::new(gateway.clone()));

        let ack = client
            .capture(&payment(Some("EX-100")), dec!(25.00))
            .await
            .unwrap();

        assert_eq!(ack.operation, LifecycleOperation::Capture);
        assert_eq!(ack.transaction_id, "EX-100");
        assert_eq!(
            gateway.calls().await,
            vec![GatewayCall::Capture {
                transaction_id: "EX-100".to_string(),
                amount: dec!(25.00)
            }]
        );
    }

    #[tokio::test]
    async fn test_refund_and_void() {
        let gateway = InMemoryGateway::new();
        let client = TransactionLifecycleClient::new(Box::new(gateway.clone()));
        let payment = payment(Some("EX-7"));

        let refund = client.refund(&payment, dec!(5.00)).await.unwrap();
        let void = client.void(&payment).await.unwrap();

        assert_eq!(refund.amount, Some(dec!(5.00)));
        assert_eq!(void.amount, None);
        assert_eq!(gateway.calls().await.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_parent_makes_no_call() {
        let gateway = InMemoryGateway::new();
        let client = TransactionLifecycleClient::new(Box::new(gateway.clone()));

        let result = client.void(&payment(None)).await;

        assert!(matches!(result, Err(PaymentError::InvalidOrderState(_))));
        assert!(gateway.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_surfaced() {
        let gateway = InMemoryGateway::failing("transaction already refunded");
        let client = TransactionLifecycleClient::new(Box::new(gateway));

        let result = client.refund(&payment(Some("EX-1")), dec!(1.00)).await;

        match result {
            Err(PaymentError::Gateway { operation, detail }) => {
                assert_eq!(operation, "refund");
                assert_eq!(detail, "transaction already refunded");
            }
            other => panic!("expected gateway error, got {other:?}"),
        }
    }
}
