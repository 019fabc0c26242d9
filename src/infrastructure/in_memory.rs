use crate::domain::order_state::{OrderState, StatusCatalog};
use crate::domain::ports::GatewayClient;
use crate::domain::request::TransactionRequest;
use crate::domain::transaction::{LifecycleOperation, TransactionResult};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const SANDBOX_REDIRECT_BASE: &str = "https://sandbox.invalid/payment/";

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Capture {
        transaction_id: String,
        amount: Decimal,
    },
    Refund {
        transaction_id: String,
        amount: Decimal,
    },
    Void {
        transaction_id: String,
    },
}

#[derive(Default)]
struct GatewayLog {
    started: Vec<TransactionRequest>,
    calls: Vec<GatewayCall>,
}

/// A gateway that accepts everything and records what it was sent.
///
/// `Clone` shares the underlying log, so a test can keep a handle while the
/// lifecycle client owns another. `failing` rejects every call instead.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    log: Arc<RwLock<GatewayLog>>,
    failure: Option<String>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            failure: Some(detail.into()),
            ..Self::default()
        }
    }

    pub async fn started(&self) -> Vec<TransactionRequest> {
        self.log.read().await.started.clone()
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.log.read().await.calls.clone()
    }

    fn check(&self, operation: LifecycleOperation) -> Result<()> {
        match &self.failure {
            Some(detail) => Err(PaymentError::gateway(operation.to_string(), detail.clone())),
            None => Ok(()),
        }
    }

    async fn record(&self, operation: LifecycleOperation, call: GatewayCall) -> Result<()> {
        self.check(operation)?;
        self.log.write().await.calls.push(call);
        Ok(())
    }
}

#[async_trait]
impl GatewayClient for InMemoryGateway {
    async fn start(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        self.check(LifecycleOperation::Start)?;
        let mut log = self.log.write().await;
        log.started.push(request.clone());
        let transaction_id = format!("{}X{:05}", request.extra1, log.started.len());
        Ok(TransactionResult {
            redirect_url: format!("{SANDBOX_REDIRECT_BASE}{transaction_id}"),
            transaction_id,
        })
    }

    async fn capture(&self, transaction_id: &str, amount: Decimal) -> Result<()> {
        let call = GatewayCall::Capture {
            transaction_id: transaction_id.to_string(),
            amount,
        };
        self.record(LifecycleOperation::Capture, call).await
    }

    async fn refund(&self, transaction_id: &str, amount: Decimal) -> Result<()> {
        let call = GatewayCall::Refund {
            transaction_id: transaction_id.to_string(),
            amount,
        };
        self.record(LifecycleOperation::Refund, call).await
    }

    async fn void(&self, transaction_id: &str) -> Result<()> {
        let call = GatewayCall::Void {
            transaction_id: transaction_id.to_string(),
        };
        self.record(LifecycleOperation::Void, call).await
    }
}

/// Status sets per order state, seeded with the order system's stock statuses.
#[derive(Debug, Clone)]
pub struct InMemoryStatusCatalog {
    statuses: HashMap<OrderState, Vec<String>>,
}

impl Default for InMemoryStatusCatalog {
    fn default() -> Self {
        let statuses = HashMap::from([
            (OrderState::New, vec!["pending".to_string()]),
            (
                OrderState::PendingPayment,
                vec!["pending_payment".to_string()],
            ),
            (OrderState::Holded, vec!["holded".to_string()]),
        ]);
        Self { statuses }
    }
}

impl InMemoryStatusCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom status under `state`.
    pub fn with_status(mut self, state: OrderState, status: impl Into<String>) -> Self {
        self.statuses.entry(state).or_default().push(status.into());
        self
    }
}

impl StatusCatalog for InMemoryStatusCatalog {
    fn statuses(&self, state: OrderState) -> Vec<String> {
        self.statuses.get(&state).cloned().unwrap_or_default()
    }
}
