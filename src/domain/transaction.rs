use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of starting a transaction at the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub transaction_id: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleOperation {
    Start,
    Capture,
    Refund,
    Void,
}

impl fmt::Display for LifecycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Capture => "capture",
            Self::Refund => "refund",
            Self::Void => "void",
        };
        f.write_str(name)
    }
}

/// Acknowledgement of a capture, refund or void accepted by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleAck {
    pub operation: LifecycleOperation,
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}
