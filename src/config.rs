//! Layered settings: built-in defaults, an optional TOML file, then
//! `PAYNL__`-prefixed environment variables (`PAYNL__METHODS__PAYNL_PAYMENT_IDEAL__HOLDED=true`).

use crate::domain::payment_method::{KLARNA_CODE, Klarna, PaymentMethod, PaymentMethodConfig};
use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_GATEWAY_ENDPOINT: &str = "https://rest-api.pay.nl/v1";
const DEFAULT_LANGUAGE: &str = "nl";
const DEFAULT_STORE_BASE_URL: &str = "http://localhost/";

/// Credentials for an explicitly constructed gateway client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GatewayCredentials {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
}

impl GatewayCredentials {
    pub fn is_complete(&self) -> bool {
        !self.endpoint.trim().is_empty()
            && self.api_token.as_deref().is_some_and(|t| !t.trim().is_empty())
            && self.service_id.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub store_base_url: String,
    pub language: String,
    #[serde(default)]
    pub gateway: GatewayCredentials,
    #[serde(default)]
    pub methods: HashMap<String, PaymentMethodConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            gateway: GatewayCredentials {
                endpoint: DEFAULT_GATEWAY_ENDPOINT.to_string(),
                ..Default::default()
            },
            methods: HashMap::new(),
        }
    }
}

impl Settings {
    /// Loads settings from defaults, `path` (when given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("store_base_url", DEFAULT_STORE_BASE_URL)?
            .set_default("language", DEFAULT_LANGUAGE)?
            .set_default("gateway.endpoint", DEFAULT_GATEWAY_ENDPOINT)?;

        if let Some(path) = path {
            info!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix("PAYNL").separator("__"))
            .build()?
            .try_deserialize()?;

        debug!(methods = settings.methods.len(), "Settings loaded");
        Ok(settings)
    }

    /// Configuration for `code`; defaults when the method is not configured.
    pub fn method(&self, code: &str) -> PaymentMethodConfig {
        let mut config = self.methods.get(code).cloned().unwrap_or_else(|| {
            debug!(code, "No configuration for payment method, using defaults");
            PaymentMethodConfig::default()
        });
        config.code = code.to_string();
        config
    }

    /// Option id Klarna resolves to in this store, used for the full-name policy.
    pub fn klarna_option_id(&self) -> u32 {
        Klarna.payment_option_id(&self.method(KLARNA_CODE))
    }
}
