use std::time::Duration;

use bpg_common::Secret;
use log::*;

pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080/transaction";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// The endpoint that creates transactions, e.g. `https://pay.example.com/transaction`
    pub url: String,
    /// Bearer token presented to the gateway on every request
    pub api_key: Secret<String>,
    /// The outbound call is abandoned after this long.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { url: DEFAULT_GATEWAY_URL.to_string(), api_key: Secret::default(), timeout: DEFAULT_GATEWAY_TIMEOUT }
    }
}

impl GatewayConfig {
    pub fn new_from_env_or_default() -> Self {
        let url = std::env::var("BPG_GATEWAY_URL").unwrap_or_else(|_| {
            warn!("🪛️ BPG_GATEWAY_URL not set, using {DEFAULT_GATEWAY_URL} as default");
            DEFAULT_GATEWAY_URL.to_string()
        });
        let api_key = Secret::new(std::env::var("BPG_GATEWAY_KEY").unwrap_or_else(|_| {
            warn!("🪛️ BPG_GATEWAY_KEY not set. Requests to the payment gateway will not be authenticated.");
            String::default()
        }));
        let timeout = std::env::var("BPG_GATEWAY_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for BPG_GATEWAY_TIMEOUT. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_GATEWAY_TIMEOUT);
        Self { url, api_key, timeout }
    }
}
