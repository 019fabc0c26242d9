use super::request::TransactionRequest;
use super::transaction::TransactionResult;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::net::IpAddr;

/// Remote payment gateway.
///
/// Implementations own transport, authentication and timeouts. Every failure
/// is reported as `PaymentError::Gateway` with the remote detail attached.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn start(&self, request: &TransactionRequest) -> Result<TransactionResult>;
    async fn capture(&self, transaction_id: &str, amount: Decimal) -> Result<()>;
    async fn refund(&self, transaction_id: &str, amount: Decimal) -> Result<()>;
    async fn void(&self, transaction_id: &str) -> Result<()>;
}

/// Best-effort lookup of the payer's address when the order's stored IP is unusable.
pub trait IpResolver: Send + Sync {
    fn resolve(&self) -> Option<IpAddr>;
}

pub type GatewayClientBox = Box<dyn GatewayClient>;
pub type IpResolverBox = Box<dyn IpResolver>;
