use thiserror::Error;

/// Errors raised while building or driving a gateway transaction.
///
/// Optional request fields never surface here: an unparseable birth date or a
/// non-numeric bank id is simply left out of the request.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Malformed free-text input such as an empty street line.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The order snapshot lacks an amount, currency or price the request needs.
    #[error("Invalid order state: {0}")]
    InvalidOrderState(String),
    /// The remote gateway rejected the call or could not be reached.
    #[error("Gateway error during {operation}: {detail}")]
    Gateway { operation: String, detail: String },
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PaymentError {
    pub fn gateway(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Gateway {
            operation: operation.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
