use crate::config::GatewayCredentials;
use crate::domain::ports::GatewayClient;
use crate::domain::request::TransactionRequest;
use crate::domain::transaction::{LifecycleOperation, TransactionResult};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gateway client speaking JSON over HTTPS.
///
/// Each operation is a POST to `{endpoint}/transaction/{operation}` with basic
/// auth `token:<api_token>`. Timeouts are left to the `reqwest` client.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
    service_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartBody<'a> {
    service_id: &'a str,
    #[serde(flatten)]
    transaction: &'a TransactionRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LifecycleBody<'a> {
    transaction_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Decimal>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RequestStatus {
    #[serde(default)]
    result: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    request: RequestStatus,
}

#[derive(Deserialize)]
struct StartResponse {
    transaction: StartedTransaction,
}

#[derive(Deserialize)]
struct StartedTransaction {
    #[serde(rename = "transactionId")]
    transaction_id: String,
    #[serde(rename = "paymentURL")]
    payment_url: String,
}

impl HttpGateway {
    pub fn new(credentials: &GatewayCredentials) -> Result<Self> {
        let (Some(api_token), Some(service_id)) = (
            credentials.api_token.clone(),
            credentials.service_id.clone(),
        ) else {
            return Err(PaymentError::Config(config::ConfigError::Message(
                "gateway api_token and service_id are required".to_string(),
            )));
        };

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            api_token,
            service_id,
        })
    }

    async fn post<B, R>(&self, operation: LifecycleOperation, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/transaction/{}", self.endpoint, operation);
        debug!(%url, "Calling gateway");

        let response = self
            .client
            .post(&url)
            .basic_auth("token", Some(&self.api_token))
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::gateway(operation.to_string(), e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PaymentError::gateway(operation.to_string(), e.to_string()))?;

        if !status.is_success() {
            return Err(PaymentError::gateway(
                operation.to_string(),
                format!("HTTP {status}: {text}"),
            ));
        }

        // The gateway also reports failures in-band with a 200.
        if let Ok(envelope) = serde_json::from_str::<Envelope>(&text)
            && envelope.request.result == "0"
        {
            let detail = envelope
                .request
                .error_message
                .unwrap_or_else(|| "request rejected".to_string());
            return Err(PaymentError::gateway(operation.to_string(), detail));
        }

        serde_json::from_str(&text)
            .map_err(|e| PaymentError::gateway(operation.to_string(), format!("{e}: {text}")))
    }

    async fn lifecycle(
        &self,
        operation: LifecycleOperation,
        transaction_id: &str,
        amount: Option<Decimal>,
    ) -> Result<()> {
        let body = LifecycleBody {
            transaction_id,
            amount,
        };
        let _: serde_json::Value = self.post(operation, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl GatewayClient for HttpGateway {
    async fn start(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        let body = StartBody {
            service_id: &self.service_id,
            transaction: request,
        };
        let response: StartResponse = self.post(LifecycleOperation::Start, &body).await?;
        Ok(TransactionResult {
            transaction_id: response.transaction.transaction_id,
            redirect_url: response.transaction.payment_url,
        })
    }

    async fn capture(&self, transaction_id: &str, amount: Decimal) -> Result<()> {
        self.lifecycle(LifecycleOperation::Capture, transaction_id, Some(amount))
            .await
    }

    async fn refund(&self, transaction_id: &str, amount: Decimal) -> Result<()> {
        self.lifecycle(LifecycleOperation::Refund, transaction_id, Some(amount))
            .await
    }

    async fn void(&self, transaction_id: &str) -> Result<()> {
        self.lifecycle(LifecycleOperation::Void, transaction_id, None)
            .await
    }
}
